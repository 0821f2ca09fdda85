//! Single-pile reduction search.
//!
//! A non-losing position is convertible when lowering exactly one pile turns
//! it into a losing position. Lowering a pile by `r` and by `r + modulus`
//! lands in the same residue class, so only reductions below `modulus` are
//! tried; the verdict matches the search over every reduction.

use crate::classifier::is_losing;
use crate::position::Position;
use serde::Serialize;
use tracing::{debug, info};

/// A successful move: pile `index` lowered by `amount` yields `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reduction {
    pub index: usize,
    pub amount: u32,
    pub result: Position,
}

/// First reduction that reaches a losing position, scanning piles in order
/// and amounts from smallest to largest.
///
/// Returns `None` for positions that are already losing.
pub fn find_reduction(position: &Position, modulus: u32, max_value: u32) -> Option<Reduction> {
    if is_losing(position, modulus) {
        return None;
    }

    for (index, &pile) in position.elements().iter().enumerate() {
        let limit = pile.saturating_sub(1).min(modulus.saturating_sub(1));
        for amount in 1..=limit {
            let value = pile - amount;
            // max_value only binds for positions built outside the generator.
            if value % modulus == 0 || value > max_value {
                continue;
            }
            let candidate = position.with_element(index, value);
            if is_losing(&candidate, modulus) {
                return Some(Reduction {
                    index,
                    amount,
                    result: candidate,
                });
            }
        }
    }
    None
}

/// Keeps the non-losing positions that no single reduction can make losing.
pub fn classify_non_convertible(
    positions: &[Position],
    modulus: u32,
    max_value: u32,
) -> Vec<Position> {
    let mut non_convertible = Vec::new();

    for position in positions {
        if is_losing(position, modulus) {
            continue;
        }
        match find_reduction(position, modulus, max_value) {
            Some(r) => debug!(
                "{} -> {} (pile {} lowered by {})",
                position, r.result, r.index, r.amount
            ),
            None => {
                debug!("{} is non-convertible", position);
                non_convertible.push(position.clone());
            }
        }
    }

    info!(
        "Reduction search: {} non-convertible positions",
        non_convertible.len()
    );
    non_convertible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_losing_has_no_reduction() {
        assert_eq!(find_reduction(&Position::new(vec![2, 2]), 3, 4), None);
    }

    #[test]
    fn test_first_reduction_is_reported() {
        // (2, 4) mod 3: lowering the first pile to 1 gives (1, 4), product 4.
        let r = find_reduction(&Position::new(vec![2, 4]), 3, 4).unwrap();
        assert_eq!(r.index, 0);
        assert_eq!(r.amount, 1);
        assert_eq!(r.result, Position::new(vec![1, 4]));
    }

    #[test]
    fn test_reduction_results() {
        // (1, 5) mod 3: 5 -> 4 is the only rescue.
        let r = find_reduction(&Position::new(vec![1, 5]), 3, 5).unwrap();
        assert_eq!(r.result, Position::new(vec![1, 4]));
        let r = find_reduction(&Position::new(vec![1, 2]), 3, 4).unwrap();
        assert_eq!(r.result, Position::new(vec![1, 1]));
    }

    #[test]
    fn test_non_convertible_mod_seven() {
        // (2, 2): only (1, 2) reachable, product 2.
        assert_eq!(find_reduction(&Position::new(vec![2, 2]), 7, 6), None);
        // (2, 3): reachable (1, 3), (1, 2), (2, 2) with products 3, 2, 4.
        assert_eq!(find_reduction(&Position::new(vec![2, 3]), 7, 6), None);
    }

    #[test]
    fn test_reduction_stays_within_max_value() {
        // (1, 7) mod 5: 7 -> 6 is losing, but 6 exceeds max_value 4.
        let oversized = Position::new(vec![1, 7]);
        assert_eq!(find_reduction(&oversized, 5, 4), None);
        let r = find_reduction(&oversized, 5, 7).unwrap();
        assert_eq!(r.result, Position::new(vec![1, 6]));
    }

    #[test]
    fn test_classify_non_convertible_mod_seven() {
        let positions: Vec<Position> = [[1, 1], [2, 2], [2, 3], [2, 4], [3, 3], [3, 5]]
            .iter()
            .map(|p| Position::new(p.to_vec()))
            .collect();
        let nc = classify_non_convertible(&positions, 7, 6);
        assert_eq!(
            nc,
            vec![
                Position::new(vec![2, 2]),
                Position::new(vec![2, 3]),
                Position::new(vec![3, 3]),
            ]
        );
    }
}
