use crate::classifier::classify_losing;
use crate::config::{AlphabetPolicy, Config};
use crate::error::NimResult;
use crate::generator::{alphabet, alphabet_capacity, combination_count, generate_positions};
use crate::position::Position;
use crate::reduction::classify_non_convertible;
use crate::replacement::{analyze_replacements, Replacement};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use strum_macros::{Display, EnumIter};
use tracing::info;

/// Exactly one label per position.
///
/// `NonConvertible` here means "non-convertible but rescued by replacement";
/// positions that replacement cannot rescue carry `ReducedNonConvertible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Losing,
    Convertible,
    NonConvertible,
    ReducedNonConvertible,
}

/// Every stage's output for one configuration, each computed once.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub config: Config,
    pub alphabet: Vec<u32>,
    pub positions: Vec<Position>,
    pub losing: Vec<Position>,
    /// Non-losing positions with no single-pile reduction to a losing one.
    pub non_convertible: Vec<Position>,
    pub replacements: Vec<Replacement>,
    /// Subset of `non_convertible` with no replacement at the target product.
    pub reduced_non_convertible: Vec<Position>,
    label_of: HashMap<Position, Classification>,
}

impl Analysis {
    pub fn run(config: &Config) -> NimResult<Self> {
        let positions = generate_positions(config)?;
        let losing = classify_losing(&positions, config.modulus)?;
        let non_convertible =
            classify_non_convertible(&positions, config.modulus, config.max_value);
        let replacements = analyze_replacements(&non_convertible, &losing, config.modulus);
        let reduced_non_convertible: Vec<Position> = replacements
            .iter()
            .filter(|r| !r.is_reachable())
            .map(|r| r.position.clone())
            .collect();

        let label_of = label_positions(
            &positions,
            &losing,
            &non_convertible,
            &reduced_non_convertible,
        );

        let analysis = Self {
            config: config.clone(),
            alphabet: alphabet(config.max_value, config.modulus, config.policy()),
            positions,
            losing,
            non_convertible,
            replacements,
            reduced_non_convertible,
            label_of,
        };

        let s = analysis.summary();
        info!(
            "Analysis complete: {} total, {} losing, {} convertible, {} non-convertible ({} reduced)",
            s.total, s.losing, s.convertible, s.non_convertible_set, s.reduced_non_convertible
        );
        Ok(analysis)
    }

    /// Label of a position from this run's set; `None` if it was not generated.
    pub fn classify(&self, position: &Position) -> Option<Classification> {
        self.label_of.get(position).copied()
    }

    /// Every generated position paired with its label, in enumeration order.
    pub fn labels(&self) -> Vec<(&Position, Classification)> {
        self.positions
            .iter()
            .filter_map(|p| self.classify(p).map(|label| (p, label)))
            .collect()
    }

    pub fn with_label(&self, label: Classification) -> Vec<&Position> {
        self.labels()
            .into_iter()
            .filter(|(_, l)| *l == label)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let total = self.positions.len();
        let losing = self.losing.len();
        let nc_set = self.non_convertible.len();
        let reduced = self.reduced_non_convertible.len();

        Summary {
            count: self.config.count,
            max_value: self.config.max_value,
            modulus: self.config.modulus,
            policy: self.config.policy(),
            alphabet_size: self.alphabet.len(),
            theoretical_capacity: combination_count(self.config.count, self.config.max_value),
            alphabet_capacity: alphabet_capacity(self.config.count, self.alphabet.len()),
            total,
            losing,
            convertible: total - losing - nc_set,
            non_convertible: nc_set - reduced,
            reduced_non_convertible: reduced,
            non_convertible_set: nc_set,
        }
    }
}

fn label_positions(
    positions: &[Position],
    losing: &[Position],
    non_convertible: &[Position],
    reduced_non_convertible: &[Position],
) -> HashMap<Position, Classification> {
    let losing: HashSet<&Position> = losing.iter().collect();
    let nc: HashSet<&Position> = non_convertible.iter().collect();
    let rnc: HashSet<&Position> = reduced_non_convertible.iter().collect();

    positions
        .iter()
        .map(|p| {
            let label = if losing.contains(p) {
                Classification::Losing
            } else if rnc.contains(p) {
                Classification::ReducedNonConvertible
            } else if nc.contains(p) {
                Classification::NonConvertible
            } else {
                Classification::Convertible
            };
            (p.clone(), label)
        })
        .collect()
}

/// Counts for one run.
///
/// `non_convertible` counts the label (excluding reduced positions);
/// `non_convertible_set` counts every position the reduction search failed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub count: u32,
    pub max_value: u32,
    pub modulus: u32,
    pub policy: AlphabetPolicy,
    pub alphabet_size: usize,
    pub theoretical_capacity: Option<u128>,
    pub alphabet_capacity: Option<u128>,
    pub total: usize,
    pub losing: usize,
    pub convertible: usize,
    pub non_convertible: usize,
    pub reduced_non_convertible: usize,
    pub non_convertible_set: usize,
}

/// Stable sort by pile sum; ties keep enumeration order.
pub fn sorted_by_sum(positions: &[Position]) -> Vec<Position> {
    let mut sorted = positions.to_vec();
    sorted.sort_by_key(|p| p.sum());
    sorted
}
