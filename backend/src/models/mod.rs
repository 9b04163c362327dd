//! Domain model for avalanche forecasts.
//!
//! - [`danger`]: danger, likelihood and size scales plus per-band ratings
//! - [`terrain`]: elevation bands, directions, sector keys and sector sets
//! - [`problem`]: avalanche problem types and problem descriptors
//! - [`forecast`]: the forecast entity and its publication state
//! - [`error`]: boundary validation errors

pub mod macros;

pub mod danger;
pub mod error;
pub mod forecast;
pub mod problem;
pub mod terrain;

pub use danger::{DangerLevel, DangerRatings, LikelihoodLevel, SizeLevel};
pub use error::{ValidationError, ValidationResult};
pub use forecast::{Forecast, ForecastId, ForecastStatus};
pub use problem::{AvalancheProblem, ProblemSlot, ProblemType};
pub use terrain::{Direction, ElevationBand, SectorKey, SectorSet};
