//! Enumeration of every position for a `(count, max_value, modulus)` triple.
//!
//! Positions are built by advancing a vector of alphabet indices like an
//! odometer: the rightmost index that can still grow is bumped and every index
//! after it restarts at the new value. Each emitted sequence is therefore
//! non-decreasing by construction and every multiset appears exactly once, in
//! lexicographic order; nothing is generated only to be filtered away. Memory
//! beyond the output is one index per pile, whatever the pile count.

use crate::config::{AlphabetPolicy, Config};
use crate::error::NimResult;
use crate::position::Position;
use tracing::{debug, info};

/// Valid pile sizes in ascending order.
pub fn alphabet(max_value: u32, modulus: u32, policy: AlphabetPolicy) -> Vec<u32> {
    (1..=max_value)
        .filter(|v| match policy {
            AlphabetPolicy::ExcludeMultiples => v % modulus != 0,
            AlphabetPolicy::Unrestricted => true,
        })
        .collect()
}

/// Enumerates the full position set described by `config`.
///
/// Fails with `InvalidArgument` before doing any work if the configuration
/// is out of range.
pub fn generate_positions(config: &Config) -> NimResult<Vec<Position>> {
    config.validate()?;

    let symbols = alphabet(config.max_value, config.modulus, config.policy());
    debug!(
        "Alphabet ({}): {} symbols {:?}",
        config.policy(),
        symbols.len(),
        symbols
    );

    let capacity = alphabet_capacity(config.count, symbols.len())
        .and_then(|c| usize::try_from(c).ok())
        .unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    enumerate(&symbols, config.count as usize, |p| out.push(p));

    info!(
        "Generated {} positions (count={}, max_value={}, modulus={})",
        out.len(),
        config.count,
        config.max_value,
        config.modulus
    );
    Ok(out)
}

fn enumerate(symbols: &[u32], piles: usize, mut emit: impl FnMut(Position)) {
    if symbols.is_empty() && piles > 0 {
        return;
    }
    let last = symbols.len().saturating_sub(1);
    let mut indices = vec![0usize; piles];

    loop {
        emit(Position::from_sorted(
            indices.iter().map(|&i| symbols[i]).collect(),
        ));

        let Some(pivot) = indices.iter().rposition(|&i| i < last) else {
            return;
        };
        let next = indices[pivot] + 1;
        indices[pivot..].fill(next);
    }
}

/// Unconstrained combinations-with-repetition of `count` piles drawn from
/// `1..=max_value`: `C(count + max_value - 1, max_value - 1)`.
///
/// Ignores alphabet exclusion. `None` on overflow.
pub fn combination_count(count: u32, max_value: u32) -> Option<u128> {
    if max_value == 0 {
        return Some(0);
    }
    let n = u128::from(count) + u128::from(max_value) - 1;
    binomial(n, u128::from(max_value) - 1)
}

/// Size of the set [`generate_positions`] produces for an alphabet of
/// `alphabet_len` symbols.
pub fn alphabet_capacity(count: u32, alphabet_len: usize) -> Option<u128> {
    if alphabet_len == 0 {
        return Some(if count == 0 { 1 } else { 0 });
    }
    let k = alphabet_len as u128;
    binomial(u128::from(count) + k - 1, k - 1)
}

fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 1..=k {
        // acc == C(n - k + i - 1, i - 1) here, so the division is exact.
        acc = acc.checked_mul(n - k + i)? / i;
    }
    Some(acc)
}
