use crate::error::{NimError, NimResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Controls whether multiples of the modulus may appear as pile sizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlphabetPolicy {
    /// Drop multiples of the modulus before enumeration.
    #[default]
    ExcludeMultiples,
    /// Enumerate every value in `1..=max_value`.
    Unrestricted,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of piles in each position
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Largest pile size
    #[arg(
        long,
        alias = "max_value",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_value: u32,

    /// Modulus the pile product is reduced by (usually prime)
    #[arg(
        long,
        visible_alias = "prime",
        alias = "mod",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub modulus: u32,

    /// Keep multiples of the modulus in the pile alphabet
    #[arg(long, default_value_t = false)]
    pub allow_multiples: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 2,
            max_value: 4,
            modulus: 3,
            allow_multiples: false,
        }
    }
}

impl Config {
    pub fn new(count: u32, max_value: u32, modulus: u32) -> Self {
        Self {
            count,
            max_value,
            modulus,
            allow_multiples: false,
        }
    }

    pub fn with_policy(mut self, policy: AlphabetPolicy) -> Self {
        self.allow_multiples = policy == AlphabetPolicy::Unrestricted;
        self
    }

    pub fn policy(&self) -> AlphabetPolicy {
        if self.allow_multiples {
            AlphabetPolicy::Unrestricted
        } else {
            AlphabetPolicy::ExcludeMultiples
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NimResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays values the user typed on the command line; file and default
    /// values are left alone.
    pub fn merge_from_cli(&mut self, cli_config: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_config.$field;
                }
            };
        }

        update_if_present!(count, "count");
        update_if_present!(max_value, "max_value");
        update_if_present!(modulus, "modulus");
        update_if_present!(allow_multiples, "allow_multiples");
    }

    /// Rejects parameters the engine cannot enumerate exactly.
    pub fn validate(&self) -> NimResult<()> {
        for (name, value) in [
            ("count", self.count),
            ("max_value", self.max_value),
            ("modulus", self.modulus),
        ] {
            if value == 0 {
                return Err(NimError::InvalidArgument(format!(
                    "{} must be a positive integer",
                    name
                )));
            }
        }

        if u128::from(self.max_value).checked_pow(self.count).is_none() {
            return Err(NimError::InvalidArgument(format!(
                "max_value^count ({}^{}) overflows the product range",
                self.max_value, self.count
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_validate_rejects_zero() {
        for cfg in [
            Config::new(0, 4, 3),
            Config::new(2, 0, 3),
            Config::new(2, 4, 0),
        ] {
            assert!(matches!(cfg.validate(), Err(NimError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_validate_rejects_product_overflow() {
        let cfg = Config::new(5, u32::MAX, 7);
        assert!(matches!(cfg.validate(), Err(NimError::InvalidArgument(_))));
        assert!(Config::new(4, u32::MAX, 7).validate().is_ok());
    }

    #[test]
    fn test_policy_round_trip() {
        for policy in AlphabetPolicy::iter() {
            assert_eq!(Config::default().with_policy(policy).policy(), policy);
            assert_eq!(AlphabetPolicy::from_str(&policy.to_string()).unwrap(), policy);
        }
        assert_eq!(Config::default().policy(), AlphabetPolicy::ExcludeMultiples);
    }

    #[test]
    fn test_merge_only_overrides_explicit_flags() {
        let matches = Harness::command().get_matches_from(["test", "--modulus", "11"]);
        let cli = Harness::from_arg_matches(&matches).unwrap();

        let mut base = Config::new(3, 10, 7);
        base.merge_from_cli(&cli.config, &matches);

        assert_eq!(base, Config::new(3, 10, 11));
    }

    #[test]
    fn test_prime_alias() {
        let h = Harness::try_parse_from(["test", "--prime", "5"]).unwrap();
        assert_eq!(h.config.modulus, 5);
    }

    #[test]
    fn test_cli_rejects_zero() {
        assert!(Harness::try_parse_from(["test", "--count", "0"]).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "modulus": 7 }"#).unwrap();
        assert_eq!(cfg, Config::new(2, 4, 7));
    }
}
