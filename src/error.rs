use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NimError {
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Export Error: refusing to export an empty position list")]
    EmptyExportRequest,

    #[error("Export Error: could not write '{}': {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data Validation Error: {0}")]
    Parse(String),
}

pub type NimResult<T> = Result<T, NimError>;
