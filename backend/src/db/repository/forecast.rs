//! Forecast repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::ForecastInfo;
use crate::models::{Forecast, ForecastId};

/// Storage for avalanche forecasts.
///
/// Implementations hold the persisted row shape
/// ([`ForecastRecord`](crate::db::models::ForecastRecord)) and validate it on
/// every read, so callers only ever see well-formed [`Forecast`] values.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ForecastRepository: Send + Sync {
    /// Check whether the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new forecast and assign its identifier.
    ///
    /// Any `id` already set on `forecast` is ignored.
    ///
    /// # Returns
    /// * `Ok(ForecastInfo)` - Listing entry for the stored forecast
    /// * `Err(RepositoryError)` - If validation or the write fails
    async fn store_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo>;

    /// Retrieve a forecast by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no forecast has this ID
    async fn get_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<Forecast>;

    /// Replace an existing forecast. `forecast.id` must be set.
    async fn update_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo>;

    /// Delete a forecast.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of forecasts removed (0 or 1)
    async fn delete_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<usize>;

    /// List all forecasts, newest forecast date first, ties by descending ID.
    async fn list_forecasts(&self) -> RepositoryResult<Vec<ForecastInfo>>;
}
