//! Replacement search against a target product.
//!
//! For a non-convertible position with product `P` and residue
//! `m = P mod modulus`, the target is `P - m + 1`: the largest value not above
//! `P` that is congruent to 1. A product divisible by the modulus aims one
//! class lower, at `P - modulus + 1`. The position survives as reduced
//! non-convertible when no losing position has exactly that product.

use crate::position::Position;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// `product - (product mod modulus) + 1`, or `product - modulus + 1` when
/// the residue is 0.
///
/// `None` when the modulus is 0 or 1, since no residue-1 class exists to aim
/// for, and when a zero residue leaves nothing positive below `product`.
pub fn target_product(product: u128, modulus: u32) -> Option<u128> {
    if modulus <= 1 {
        return None;
    }
    let modulus = u128::from(modulus);
    match product % modulus {
        0 => product.checked_sub(modulus - 1).filter(|&t| t > 0),
        m => Some(product - m + 1),
    }
}

/// Outcome of the replacement search for one non-convertible position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub position: Position,
    pub product: u128,
    pub residue: u32,
    pub target: Option<u128>,
    /// First losing position (in enumeration order) whose product is `target`.
    pub witness: Option<Position>,
}

impl Replacement {
    pub fn is_reachable(&self) -> bool {
        self.witness.is_some()
    }
}

/// Product lookup over the losing set, built once per run.
pub struct LosingIndex<'a> {
    by_product: HashMap<u128, &'a Position>,
}

impl<'a> LosingIndex<'a> {
    pub fn new(losing: &'a [Position]) -> Self {
        let mut by_product = HashMap::with_capacity(losing.len());
        for p in losing {
            by_product.entry(p.product()).or_insert(p);
        }
        Self { by_product }
    }

    pub fn find(&self, product: u128) -> Option<&'a Position> {
        self.by_product.get(&product).copied()
    }
}

/// Runs the replacement search for every non-convertible position.
pub fn analyze_replacements(
    non_convertible: &[Position],
    losing: &[Position],
    modulus: u32,
) -> Vec<Replacement> {
    let index = LosingIndex::new(losing);

    non_convertible
        .iter()
        .map(|position| {
            let product = position.product();
            let residue = position.residue(modulus.max(1));
            let target = target_product(product, modulus);
            if residue == 0 && modulus > 1 {
                warn!(
                    "{} has product {} ≡ 0 (mod {}); aiming at {:?}",
                    position, product, modulus, target
                );
            }
            let witness = target.and_then(|t| index.find(t)).cloned();
            match &witness {
                Some(w) => debug!("{} can be replaced by {} (product {:?})", position, w, target),
                None => debug!("{} has no replacement (target {:?})", position, target),
            }
            Replacement {
                position: position.clone(),
                product,
                residue,
                target,
                witness,
            }
        })
        .collect()
}

/// Keeps the non-convertible positions no losing position can stand in for.
pub fn classify_reduced_non_convertible(
    non_convertible: &[Position],
    losing: &[Position],
    modulus: u32,
) -> Vec<Position> {
    let reduced: Vec<Position> = analyze_replacements(non_convertible, losing, modulus)
        .into_iter()
        .filter(|r| !r.is_reachable())
        .map(|r| r.position)
        .collect();

    info!(
        "Replacement search: {} reduced non-convertible positions",
        reduced.len()
    );
    reduced
}
