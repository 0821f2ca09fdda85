use crate::config::Config;
use crate::error::{NimError, NimResult};
use crate::position::Position;
use std::fs::File;
use std::path::Path;
use strum_macros::Display;
use tracing::info;

/// Which position list a CSV file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExportKind {
    Losing,
    NonConvertible,
    ReducedNonConvertible,
}

impl ExportKind {
    fn file_prefix(&self) -> &'static str {
        match self {
            Self::Losing => "combinations",
            Self::NonConvertible => "non_convertible",
            Self::ReducedNonConvertible => "reduced_non_convertible",
        }
    }
}

/// e.g. `non_convertible_count3_max6_mod7.csv`
pub fn export_file_name(kind: ExportKind, config: &Config) -> String {
    format!(
        "{}_count{}_max{}_mod{}.csv",
        kind.file_prefix(),
        config.count,
        config.max_value,
        config.modulus
    )
}

fn header(width: usize) -> Vec<String> {
    (1..=width).map(|i| format!("value{}", i)).collect()
}

/// Writes `value1..valueN` followed by one row per position.
pub fn export_positions<P: AsRef<Path>>(positions: &[Position], path: P) -> NimResult<()> {
    let path = path.as_ref();
    let first = positions.first().ok_or(NimError::EmptyExportRequest)?;

    let file = File::create(path).map_err(|source| NimError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(header(first.len()))?;
    for p in positions {
        wtr.write_record(p.elements().iter().map(|e| e.to_string()))?;
    }
    wtr.flush().map_err(|source| NimError::Export {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Saved {} positions to {}", positions.len(), path.display());
    Ok(())
}

/// Reads a file written by [`export_positions`], keeping row order.
pub fn read_positions<P: AsRef<Path>>(path: P) -> NimResult<Vec<Position>> {
    let mut rdr = csv::Reader::from_path(path)?;

    let headers = rdr.headers()?.clone();
    let expected = header(headers.len());
    if headers.iter().ne(expected.iter().map(String::as_str)) {
        return Err(NimError::Parse(format!(
            "unexpected header row: {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut positions = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let elements = record
            .iter()
            .map(|field| {
                field.trim().parse::<u32>().map_err(|e| {
                    NimError::Parse(format!("row {}: '{}' is not a pile size: {}", row + 1, field, e))
                })
            })
            .collect::<NimResult<Vec<u32>>>()?;
        positions.push(Position::new(elements));
    }
    Ok(positions)
}
