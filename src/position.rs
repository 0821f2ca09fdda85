use serde::{Deserialize, Serialize};
use std::fmt;

/// A multiset of pile sizes, stored in non-decreasing order.
///
/// Positions are never mutated after construction. Moves such as reducing a
/// pile produce a fresh `Position` via [`Position::with_element`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position {
    elements: Vec<u32>,
}

impl Position {
    /// Builds a position from arbitrary pile sizes, sorting them.
    pub fn new(mut elements: Vec<u32>) -> Self {
        elements.sort_unstable();
        Self { elements }
    }

    /// Caller guarantees `elements` is already non-decreasing.
    pub(crate) fn from_sorted(elements: Vec<u32>) -> Self {
        debug_assert!(elements.windows(2).all(|w| w[0] <= w[1]));
        Self { elements }
    }

    pub fn elements(&self) -> &[u32] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Exact product of all piles.
    ///
    /// Exact as long as `max_value^count` fits in `u128`, which
    /// [`crate::config::Config::validate`] enforces for generated sets.
    pub fn product(&self) -> u128 {
        self.elements.iter().map(|&e| u128::from(e)).product()
    }

    pub fn sum(&self) -> u64 {
        self.elements.iter().map(|&e| u64::from(e)).sum()
    }

    /// `product() % modulus`, folded pile by pile so it never overflows.
    pub fn residue(&self, modulus: u32) -> u32 {
        let m = u64::from(modulus);
        let r = self
            .elements
            .iter()
            .fold(1 % m, |acc, &e| (acc * (u64::from(e) % m)) % m);
        r as u32
    }

    pub fn has_multiple_of(&self, modulus: u32) -> bool {
        self.elements.iter().any(|&e| e % modulus == 0)
    }

    /// Returns a new position with pile `index` set to `value`, re-sorted.
    pub fn with_element(&self, index: usize, value: u32) -> Position {
        let mut elements = self.elements.clone();
        elements[index] = value;
        Position::new(elements)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<u32>> for Position {
    fn from(elements: Vec<u32>) -> Self {
        Position::new(elements)
    }
}
