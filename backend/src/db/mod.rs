//! Forecast storage.
//!
//! Storage goes through the Repository pattern so backends can be swapped.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Front ends (CLI, editing UI)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Ratings re-derived before every write                │
//! │  - Publish / unpublish lifecycle                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  ForecastRepository trait (repository/)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ LocalRepository   JsonFile   │
//!     │ (in-memory)       Repository │
//!     └──────────────────────────────┘
//! ```
//!
//! Both backends store [`ForecastRecord`] rows: sectors as JSON arrays of
//! sector keys, ratings as three integer columns.
//!
//! # Usage
//! ```ignore
//! use avalanche_forecast::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!     let forecasts = services::list_forecasts(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

pub use services::{
    create_draft, delete_forecast, get_danger_ratings, get_forecast, health_check,
    list_forecasts, list_published, open_editor, publish_forecast, save_forecast,
    unpublish_forecast,
};

pub use factory::{RepositoryFactory, RepositorySource, RepositoryType};
pub use models::ForecastRecord;
pub use repo_config::RepositoryConfig;
#[cfg(feature = "file-repo")]
pub use repositories::JsonFileRepository;
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, ForecastRepository, RepositoryError, RepositoryResult};

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn ForecastRepository>> = OnceLock::new();

/// Initialize the global repository singleton, falling back to in-memory
/// storage when nothing is configured.
///
/// Later calls are no-ops once a repository is set.
pub fn init_repository(config_path: Option<&Path>) -> Result<()> {
    init_repository_with_fallback(config_path, RepositoryType::Local)
}

/// Initialize the global repository singleton with the given default backend.
///
/// One-shot processes should pass [`RepositoryType::File`] so writes outlive
/// the process.
pub fn init_repository_with_fallback(
    config_path: Option<&Path>,
    fallback: RepositoryType,
) -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let source = RepositorySource::detect(config_path, fallback);
    let repo = RepositoryFactory::from_source(&source).with_context(|| {
        format!("Failed to initialize forecast repository from {:?}", source)
    })?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn ForecastRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository(None)?;
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
