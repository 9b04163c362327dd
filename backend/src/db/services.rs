//! Service layer for forecast storage.
//!
//! Repository-agnostic functions that hold the forecast lifecycle rules:
//! ratings are re-derived before every write, a forecast is published once,
//! and deletes of unknown IDs are reported as not found.

use chrono::{NaiveDate, Utc};

use super::repository::{ErrorContext, ForecastRepository, RepositoryError, RepositoryResult};
use crate::api::ForecastInfo;
use crate::models::{DangerRatings, Forecast, ForecastId, ForecastStatus};
use crate::services::ForecastEditor;

/// Check if the repository backend is reachable.
pub async fn health_check<R: ForecastRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Open and store a new draft.
///
/// # Returns
/// The stored draft with its assigned ID.
pub async fn create_draft<R: ForecastRepository + ?Sized>(
    repo: &R,
    region: &str,
    forecast_date: NaiveDate,
    author: &str,
) -> RepositoryResult<Forecast> {
    let mut forecast = Forecast::draft(region.trim(), forecast_date, author.trim());
    let info = repo.store_forecast(&forecast).await?;
    forecast.id = Some(info.forecast_id);
    log::info!(
        "Service layer: created draft {} for '{}' on {}",
        info.forecast_id,
        forecast.region,
        forecast.forecast_date
    );
    Ok(forecast)
}

/// Store a forecast after re-deriving its ratings.
///
/// Forecasts without an ID are inserted and receive one; others replace the
/// stored version.
pub async fn save_forecast<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast: &mut Forecast,
) -> RepositoryResult<ForecastInfo> {
    forecast.recompute_danger();
    forecast.updated_at = Utc::now();

    let info = match forecast.id {
        Some(_) => repo.update_forecast(forecast).await?,
        None => {
            let info = repo.store_forecast(forecast).await?;
            forecast.id = Some(info.forecast_id);
            info
        }
    };
    log::info!(
        "Service layer: saved forecast {} (alp={}, tl={}, btl={})",
        info.forecast_id,
        info.danger.alp.value(),
        info.danger.tl.value(),
        info.danger.btl.value()
    );
    Ok(info)
}

/// Publish a draft.
///
/// Ratings are re-derived first so the published levels match the problems.
pub async fn publish_forecast<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<Forecast> {
    let mut forecast = repo.get_forecast(forecast_id).await?;
    if forecast.is_published() {
        return Err(RepositoryError::validation_with_context(
            format!("Forecast {} is already published", forecast_id),
            ErrorContext::new("publish_forecast")
                .with_entity("forecast")
                .with_entity_id(forecast_id),
        ));
    }

    let now = Utc::now();
    forecast.recompute_danger();
    forecast.status = ForecastStatus::Published;
    forecast.published_at = Some(now);
    forecast.updated_at = now;
    repo.update_forecast(&forecast).await?;

    log::info!(
        "Service layer: published forecast {} for '{}' (highest danger {})",
        forecast_id,
        forecast.region,
        forecast.danger.highest()
    );
    Ok(forecast)
}

/// Return a published forecast to draft.
pub async fn unpublish_forecast<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<Forecast> {
    let mut forecast = repo.get_forecast(forecast_id).await?;
    if !forecast.is_published() {
        return Err(RepositoryError::validation_with_context(
            format!("Forecast {} is not published", forecast_id),
            ErrorContext::new("unpublish_forecast")
                .with_entity("forecast")
                .with_entity_id(forecast_id),
        ));
    }

    forecast.status = ForecastStatus::Draft;
    forecast.published_at = None;
    forecast.updated_at = Utc::now();
    repo.update_forecast(&forecast).await?;

    log::info!("Service layer: unpublished forecast {}", forecast_id);
    Ok(forecast)
}

pub async fn get_forecast<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<Forecast> {
    repo.get_forecast(forecast_id).await
}

/// Load a stored forecast into an editor.
pub async fn open_editor<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<ForecastEditor> {
    let forecast = repo.get_forecast(forecast_id).await?;
    Ok(ForecastEditor::new(forecast))
}

pub async fn list_forecasts<R: ForecastRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ForecastInfo>> {
    repo.list_forecasts().await
}

/// List published forecasts, optionally for one region (case-insensitive).
pub async fn list_published<R: ForecastRepository + ?Sized>(
    repo: &R,
    region: Option<&str>,
) -> RepositoryResult<Vec<ForecastInfo>> {
    let forecasts = repo.list_forecasts().await?;
    Ok(forecasts
        .into_iter()
        .filter(|info| info.status == ForecastStatus::Published)
        .filter(|info| {
            region.map_or(true, |r| info.region.eq_ignore_ascii_case(r.trim()))
        })
        .collect())
}

/// Delete a forecast.
///
/// # Errors
/// `NotFound` when no forecast has this ID.
pub async fn delete_forecast<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<()> {
    let removed = repo.delete_forecast(forecast_id).await?;
    if removed == 0 {
        return Err(RepositoryError::not_found_with_context(
            format!("Forecast {} not found", forecast_id),
            ErrorContext::new("delete_forecast")
                .with_entity("forecast")
                .with_entity_id(forecast_id),
        ));
    }
    log::info!("Service layer: deleted forecast {}", forecast_id);
    Ok(())
}

/// Stored per-band ratings of a forecast.
pub async fn get_danger_ratings<R: ForecastRepository + ?Sized>(
    repo: &R,
    forecast_id: ForecastId,
) -> RepositoryResult<DangerRatings> {
    Ok(repo.get_forecast(forecast_id).await?.danger)
}
