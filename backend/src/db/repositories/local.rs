//! In-memory repository for tests and local development.
//!
//! Stores [`ForecastRecord`] rows behind a `parking_lot::RwLock`, so reads go
//! through the same decode-and-validate path as the file backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::ForecastInfo;
use crate::db::models::ForecastRecord;
use crate::db::repository::{
    listing_order, ErrorContext, ForecastRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Forecast, ForecastId};

#[derive(Debug)]
struct LocalData {
    forecasts: HashMap<i64, ForecastRecord>,
    next_forecast_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            forecasts: HashMap::new(),
            next_forecast_id: 1,
            is_healthy: true,
        }
    }
}

/// In-memory forecast repository.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable backend. Every operation fails with a
    /// connection error while unhealthy.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Drop all forecasts and reset ID assignment.
    pub fn clear(&self) {
        *self.data.write() = LocalData::default();
    }

    pub fn forecast_count(&self) -> usize {
        self.data.read().forecasts.len()
    }

    /// Insert a raw row as-is, bypassing encoding. Lets tests seed rows that
    /// a well-behaved writer would never produce.
    pub fn insert_record(&self, record: ForecastRecord) {
        let mut data = self.data.write();
        data.next_forecast_id = data.next_forecast_id.max(record.forecast_id + 1);
        data.forecasts.insert(record.forecast_id, record);
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection_with_context(
                "Local repository is unhealthy",
                ErrorContext::new(operation),
            ))
        }
    }
}

fn not_found(operation: &str, forecast_id: ForecastId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Forecast {} not found", forecast_id),
        ErrorContext::new(operation)
            .with_entity("forecast")
            .with_entity_id(forecast_id),
    )
}

#[async_trait]
impl ForecastRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo> {
        self.ensure_healthy("store_forecast")?;
        forecast
            .validate()
            .map_err(|e| {
                RepositoryError::from(e).with_operation("store_forecast")
            })?;

        let mut data = self.data.write();
        let forecast_id = ForecastId::new(data.next_forecast_id);
        data.next_forecast_id += 1;

        let record = ForecastRecord::from_forecast(forecast, forecast_id);
        let info = record.to_info()?;
        data.forecasts.insert(forecast_id.value(), record);
        Ok(info)
    }

    async fn get_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<Forecast> {
        self.ensure_healthy("get_forecast")?;
        let record = self
            .data
            .read()
            .forecasts
            .get(&forecast_id.value())
            .cloned()
            .ok_or_else(|| not_found("get_forecast", forecast_id))?;
        record.into_forecast().map_err(|e| {
            RepositoryError::validation_with_context(
                e.to_string(),
                ErrorContext::new("get_forecast")
                    .with_entity("forecast")
                    .with_entity_id(forecast_id),
            )
        })
    }

    async fn update_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo> {
        self.ensure_healthy("update_forecast")?;
        let forecast_id = forecast.id.ok_or_else(|| {
            RepositoryError::validation_with_context(
                "Forecast has no ID; store it first",
                ErrorContext::new("update_forecast").with_entity("forecast"),
            )
        })?;
        forecast
            .validate()
            .map_err(|e| {
                RepositoryError::from(e).with_operation("update_forecast")
            })?;

        let mut data = self.data.write();
        if !data.forecasts.contains_key(&forecast_id.value()) {
            return Err(not_found("update_forecast", forecast_id));
        }
        let record = ForecastRecord::from_forecast(forecast, forecast_id);
        let info = record.to_info()?;
        data.forecasts.insert(forecast_id.value(), record);
        Ok(info)
    }

    async fn delete_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<usize> {
        self.ensure_healthy("delete_forecast")?;
        let removed = self.data.write().forecasts.remove(&forecast_id.value());
        Ok(usize::from(removed.is_some()))
    }

    async fn list_forecasts(&self) -> RepositoryResult<Vec<ForecastInfo>> {
        self.ensure_healthy("list_forecasts")?;
        let data = self.data.read();
        let mut infos = data
            .forecasts
            .values()
            .map(|record| {
                record.to_info().map_err(|e| {
                    RepositoryError::validation_with_context(
                        e.to_string(),
                        ErrorContext::new("list_forecasts")
                            .with_entity("forecast")
                            .with_entity_id(record.forecast_id),
                    )
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;
        infos.sort_by(listing_order);
        Ok(infos)
    }
}
