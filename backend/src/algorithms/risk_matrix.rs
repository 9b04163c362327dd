//! Likelihood × size risk matrix.
//!
//! Rows are indexed by `5 - likelihood` (row 0 is Certain), columns by
//! `size - 1` (column 0 is Small).

use crate::models::{DangerLevel, LikelihoodLevel, SizeLevel, ValidationResult};

use DangerLevel::{Considerable, Extreme, High, Low, Moderate};

/// Danger level for every (likelihood, size) pair.
pub const RISK_MATRIX: [[DangerLevel; 5]; 5] = [
    // Certain
    [Considerable, High, High, Extreme, Extreme],
    // Very Likely
    [Moderate, Considerable, High, High, Extreme],
    // Likely
    [Moderate, Considerable, Considerable, High, High],
    // Possible
    [Low, Moderate, Considerable, Considerable, High],
    // Unlikely
    [Low, Low, Moderate, Considerable, Considerable],
];

/// Danger level of a single problem.
///
/// Total over the typed scales; both indices are in range by construction.
pub fn risk_level(likelihood: LikelihoodLevel, size: SizeLevel) -> DangerLevel {
    let row = 5 - usize::from(likelihood.value());
    let col = usize::from(size.value()) - 1;
    RISK_MATRIX[row][col]
}

/// [`risk_level`] for raw integers coming from outside the typed domain.
///
/// # Errors
/// [`ValidationError::LikelihoodOutOfRange`](crate::models::ValidationError::LikelihoodOutOfRange)
/// or [`ValidationError::SizeOutOfRange`](crate::models::ValidationError::SizeOutOfRange)
/// when either value is outside 1..=5.
pub fn risk_level_checked(likelihood: i64, size: i64) -> ValidationResult<DangerLevel> {
    let likelihood = LikelihoodLevel::from_value(likelihood)?;
    let size = SizeLevel::from_value(size)?;
    Ok(risk_level(likelihood, size))
}
