use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use mulnim::config::Config;
use mulnim::error::NimResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multiplicative Nim position classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with count / max_value / modulus / allow_multiples
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report how many positions a configuration would produce
    Count(cmd::count::CountArgs),
    /// Generate, classify, report and export positions
    Analyze(cmd::analyze::AnalyzeArgs),
}

fn resolve_config(
    config_file: Option<&str>,
    cli_config: &Config,
    sub_matches: &ArgMatches,
) -> NimResult<Config> {
    match config_file {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, sub_matches);
            Ok(config)
        }
        None => Ok(cli_config.clone()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Count(args) => (&args.config, "count"),
        Commands::Analyze(args) => (&args.config, "analyze"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("Missing arguments for subcommand '{}'", sub_name);
        process::exit(2);
    };

    let config = resolve_config(cli.config_file.as_deref(), cli_config, sub_matches)
        .and_then(|c| c.validate().map(|_| c))
        .unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });

    let result = match &cli.command {
        Commands::Count(_) => cmd::count::run(&config),
        Commands::Analyze(args) => cmd::analyze::run(args, &config, cli.debug),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
