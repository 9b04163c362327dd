//! Repository traits and error types.
//!
//! - [`ForecastRepository`]: forecast CRUD
//! - [`RepositoryError`]: structured errors with [`ErrorContext`]

pub mod error;
pub mod forecast;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use forecast::ForecastRepository;

use std::cmp::Ordering;

/// Listing order shared by every backend: newest date first, then newest ID.
pub(crate) fn listing_order(
    a: &crate::api::ForecastInfo,
    b: &crate::api::ForecastInfo,
) -> Ordering {
    b.forecast_date
        .cmp(&a.forecast_date)
        .then_with(|| b.forecast_id.value().cmp(&a.forecast_id.value()))
}
