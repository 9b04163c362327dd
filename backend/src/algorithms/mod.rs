//! Danger-level derivation.
//!
//! Pure, synchronous functions with no shared state:
//!
//! - [`risk_matrix`]: likelihood × size lookup for a single problem
//! - [`aggregation`]: per-band maximum over the active problems
//!
//! Callers recompute on demand after every edit; at most 24 sectors per
//! problem, so nothing is cached.

pub mod aggregation;
pub mod risk_matrix;


pub use aggregation::{calculate_risk, has_sector_in_band};
pub use risk_matrix::{risk_level, risk_level_checked, RISK_MATRIX};
