use crate::reports;
use clap::Args;
use mulnim::config::Config;
use mulnim::error::NimResult;
use mulnim::generator::{alphabet, alphabet_capacity, combination_count};

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(config: &Config) -> NimResult<()> {
    config.validate()?;

    let symbols = alphabet(config.max_value, config.modulus, config.policy());
    reports::print_capacity(
        config,
        &symbols,
        combination_count(config.count, config.max_value),
        alphabet_capacity(config.count, symbols.len()),
    );

    println!("\nUse the `analyze` command to generate and classify these positions.");
    Ok(())
}
