use crate::reports;
use clap::Args;
use mulnim::analysis::{sorted_by_sum, Analysis};
use mulnim::config::Config;
use mulnim::error::{NimError, NimResult};
use mulnim::export::{export_file_name, export_positions, ExportKind};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Directory the CSV files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip writing CSV files
    #[arg(long, default_value_t = false)]
    pub no_export: bool,

    /// Print the summary as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &AnalyzeArgs, config: &Config, debug: bool) -> NimResult<()> {
    let analysis = Analysis::run(config)?;
    let summary = analysis.summary();

    let losing = sorted_by_sum(&analysis.losing);
    let non_convertible = sorted_by_sum(&analysis.non_convertible);
    let reduced = sorted_by_sum(&analysis.reduced_non_convertible);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_summary(&summary);
        reports::print_positions(
            "Non-convertible positions (no single pile reduction reaches a losing position)",
            &non_convertible,
        );
        reports::print_positions(
            "Reduced non-convertible positions (no replacement reaches the target product)",
            &reduced,
        );
        if debug {
            reports::print_positions("Losing positions", &losing);
            reports::print_replacement_details(&analysis.replacements, config.modulus);
        }
    }

    if args.no_export {
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir).map_err(|source| NimError::Export {
        path: args.output_dir.clone(),
        source,
    })?;

    for (kind, positions) in [
        (ExportKind::Losing, &losing),
        (ExportKind::NonConvertible, &non_convertible),
        (ExportKind::ReducedNonConvertible, &reduced),
    ] {
        let path = args.output_dir.join(export_file_name(kind, config));
        match export_positions(positions, &path) {
            Ok(()) => {}
            Err(NimError::EmptyExportRequest) => {
                info!("No {} positions; skipping {}", kind, path.display());
            }
            Err(e) => {
                warn!("Export of {} positions failed", kind);
                return Err(e);
            }
        }
    }
    Ok(())
}
