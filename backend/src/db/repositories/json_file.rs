//! JSON file repository.
//!
//! Keeps every forecast row in a single JSON document on disk. Each
//! operation runs on the blocking pool and holds an advisory lock on a
//! sibling `<file>.lock` for its whole read-modify-write: shared for reads,
//! exclusive for writes. The lock is per open file, so separate handles and
//! separate processes on the same path serialize against each other.
//! Writes go to a uniquely named temp file in the same directory, which is
//! then renamed over the document.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::task;

use crate::api::ForecastInfo;
use crate::db::models::ForecastRecord;
use crate::db::repository::{
    listing_order, ErrorContext, ForecastRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Forecast, ForecastId};

/// On-disk document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForecastDocument {
    next_forecast_id: i64,
    #[serde(default)]
    forecasts: Vec<ForecastRecord>,
}

impl Default for ForecastDocument {
    fn default() -> Self {
        Self {
            next_forecast_id: 1,
            forecasts: Vec::new(),
        }
    }
}

impl ForecastDocument {
    fn position(&self, forecast_id: ForecastId) -> Option<usize> {
        self.forecasts
            .iter()
            .position(|r| r.forecast_id == forecast_id.value())
    }
}

/// Forecast repository backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileRepository {
    /// Open a repository at `path`.
    ///
    /// The file is created on first write; its parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(RepositoryError::configuration_with_context(
                "Forecast data file path is empty",
                ErrorContext::new("open_json_file"),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(RepositoryError::configuration_with_context(
                    format!("Directory {} does not exist", parent.display()),
                    ErrorContext::new("open_json_file").with_details(path.display().to_string()),
                ));
            }
        }
        let lock_path = lock_path_for(&path);
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the loaded document on the blocking pool.
    ///
    /// When `persist` is set and `f` succeeds, the document is written back.
    async fn with_document<T, F>(
        &self,
        operation: &'static str,
        persist: bool,
        f: F,
    ) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut ForecastDocument) -> RepositoryResult<T> + Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();

        task::spawn_blocking(move || {
            let _lock = DocumentLock::acquire(&lock_path, persist)
                .map_err(|e| e.with_operation(operation))?;
            let mut document = load_document(&path).map_err(|e| e.with_operation(operation))?;
            let result = f(&mut document).map_err(|e| e.with_operation(operation))?;
            if persist {
                save_document(&path, &document).map_err(|e| e.with_operation(operation))?;
            }
            Ok(result)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Advisory lock on the document's lock file, released on drop.
struct DocumentLock {
    file: File,
}

impl DocumentLock {
    fn acquire(lock_path: &Path, exclusive: bool) -> RepositoryResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;
        if exclusive {
            file.lock_exclusive()?;
        } else {
            file.lock_shared()?;
        }
        Ok(Self { file })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            log::warn!("Failed to release forecast data lock: {}", e);
        }
    }
}

fn load_document(path: &Path) -> RepositoryResult<ForecastDocument> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ForecastDocument::default()),
        Err(e) => {
            return Err(RepositoryError::storage_with_context(
                format!("Failed to read {}: {}", path.display(), e),
                ErrorContext::default().with_details(format!("io_kind={:?}", e.kind())),
            ))
        }
    };
    if content.trim().is_empty() {
        return Ok(ForecastDocument::default());
    }
    serde_json::from_str(&content).map_err(|e| {
        RepositoryError::storage_with_context(
            format!("Failed to parse {}: {}", path.display(), e),
            ErrorContext::default().with_details(format!("line={}", e.line())),
        )
    })
}

fn save_document(path: &Path, document: &ForecastDocument) -> RepositoryResult<()> {
    let json = serde_json::to_vec_pretty(document)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn not_found(forecast_id: ForecastId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Forecast {} not found", forecast_id),
        ErrorContext::default()
            .with_entity("forecast")
            .with_entity_id(forecast_id),
    )
}

#[async_trait]
impl ForecastRepository for JsonFileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let result = self
            .with_document("health_check", false, |doc| Ok(doc.forecasts.len()))
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                log::warn!("JSON file repository unhealthy: {}", e);
                Ok(false)
            }
        }
    }

    async fn store_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo> {
        forecast
            .validate()
            .map_err(|e| {
                RepositoryError::from(e).with_operation("store_forecast")
            })?;
        let forecast = forecast.clone();

        self.with_document("store_forecast", true, move |doc| {
            let forecast_id = ForecastId::new(doc.next_forecast_id);
            doc.next_forecast_id += 1;
            let record = ForecastRecord::from_forecast(&forecast, forecast_id);
            let info = record.to_info()?;
            doc.forecasts.push(record);
            Ok(info)
        })
        .await
    }

    async fn get_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<Forecast> {
        self.with_document("get_forecast", false, move |doc| {
            let record = doc
                .position(forecast_id)
                .map(|idx| doc.forecasts[idx].clone())
                .ok_or_else(|| not_found(forecast_id))?;
            record.into_forecast().map_err(|e| {
                RepositoryError::validation_with_context(
                    e.to_string(),
                    ErrorContext::default()
                        .with_entity("forecast")
                        .with_entity_id(forecast_id),
                )
            })
        })
        .await
    }

    async fn update_forecast(&self, forecast: &Forecast) -> RepositoryResult<ForecastInfo> {
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
        let forecast = forecast.clone();

        self.with_document("update_forecast", true, move |doc| {
            let idx = doc
                .position(forecast_id)
                .ok_or_else(|| not_found(forecast_id))?;
            let record = ForecastRecord::from_forecast(&forecast, forecast_id);
            let info = record.to_info()?;
            doc.forecasts[idx] = record;
            Ok(info)
        })
        .await
    }

    async fn delete_forecast(&self, forecast_id: ForecastId) -> RepositoryResult<usize> {
        self.with_document("delete_forecast", true, move |doc| {
            let before = doc.forecasts.len();
            let id = forecast_id.value();
            doc.forecasts.retain(|r| r.forecast_id != id);
            Ok(before - doc.forecasts.len())
        })
        .await
    }

    async fn list_forecasts(&self) -> RepositoryResult<Vec<ForecastInfo>> {
        self.with_document("list_forecasts", false, |doc| {
            let mut infos = doc
                .forecasts
                .iter()
                .map(|record| {
                    record.to_info().map_err(|e| {
                        RepositoryError::validation_with_context(
                            e.to_string(),
                            ErrorContext::default()
                                .with_entity("forecast")
                                .with_entity_id(record.forecast_id),
                        )
                    })
                })
                .collect::<RepositoryResult<Vec<_>>>()?;
            infos.sort_by(listing_order);
            Ok(infos)
        })
        .await
    }
}
