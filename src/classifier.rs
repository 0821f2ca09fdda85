use crate::error::{NimError, NimResult};
use crate::position::Position;
use tracing::info;

/// A position is losing when its product is congruent to 1 modulo `modulus`
/// and none of its piles is itself a multiple of `modulus`.
///
/// Nothing is losing modulo 0 or 1.
pub fn is_losing(position: &Position, modulus: u32) -> bool {
    if modulus <= 1 {
        return false;
    }
    position.residue(modulus) == 1 && !position.has_multiple_of(modulus)
}

/// Keeps the losing positions, preserving input order.
pub fn classify_losing(positions: &[Position], modulus: u32) -> NimResult<Vec<Position>> {
    if modulus == 0 {
        return Err(NimError::InvalidArgument(
            "modulus must be a positive integer".to_string(),
        ));
    }

    let losing: Vec<Position> = positions
        .iter()
        .filter(|p| is_losing(p, modulus))
        .cloned()
        .collect();

    info!(
        "Residue filter: {} of {} positions have product ≡ 1 (mod {})",
        losing.len(),
        positions.len(),
        modulus
    );
    Ok(losing)
}
