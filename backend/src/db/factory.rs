//! Repository factory for dependency injection.
//!
//! Creates repository instances from a type tag, the environment, or a
//! `repository.toml` file.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::{RepositoryConfig, DEFAULT_DATA_FILE};
#[cfg(feature = "file-repo")]
use super::repositories::JsonFileRepository;
use super::repositories::LocalRepository;
use super::repository::{ErrorContext, ForecastRepository, RepositoryError, RepositoryResult};

/// Environment variable selecting the backend.
pub const REPOSITORY_TYPE_ENV: &str = "REPOSITORY_TYPE";
/// Environment variable naming the file repository's data file.
pub const DATA_FILE_ENV: &str = "FORECAST_DATA_FILE";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON document on disk
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "memory", "file", "json").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, a set `FORECAST_DATA_FILE` selects
    /// the file repository; otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var(REPOSITORY_TYPE_ENV) {
            return val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to local repository", e);
                Self::Local
            });
        }

        if std::env::var(DATA_FILE_ENV).is_ok() {
            Self::File
        } else {
            Self::Local
        }
    }
}

/// Where the backend choice comes from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// An explicitly named `repository.toml`
    ConfigFile(PathBuf),
    /// `REPOSITORY_TYPE` / `FORECAST_DATA_FILE`
    Environment,
    /// A `repository.toml` found in a standard location
    DefaultConfig(PathBuf),
    /// Nothing configured; the caller's default backend
    Fallback(RepositoryType),
}

impl RepositorySource {
    /// Resolve the source: an explicit config file, then the environment,
    /// then a `repository.toml` in the standard locations, then `fallback`.
    pub fn detect(config_path: Option<&Path>, fallback: RepositoryType) -> Self {
        if let Some(path) = config_path {
            return Self::ConfigFile(path.to_path_buf());
        }
        if std::env::var_os(REPOSITORY_TYPE_ENV).is_some()
            || std::env::var_os(DATA_FILE_ENV).is_some()
        {
            return Self::Environment;
        }
        match RepositoryConfig::default_location() {
            Some(path) => Self::DefaultConfig(path),
            None => Self::Fallback(fallback),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use avalanche_forecast::db::{RepositoryFactory, RepositoryType};
///
/// let memory = RepositoryFactory::create_local();
/// let on_disk = RepositoryFactory::create(RepositoryType::File, Some("forecasts.json".as_ref()))?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `data_file` is used by the file repository; it defaults to
    /// `forecasts.json` in the working directory.
    pub fn create(
        repo_type: RepositoryType,
        data_file: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::File => {
                let path = data_file
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
                Self::create_file(path)
            }
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn ForecastRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a JSON file repository.
    #[cfg(feature = "file-repo")]
    pub fn create_file(path: PathBuf) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        log::info!("Opening JSON file repository at {}", path.display());
        Ok(Arc::new(JsonFileRepository::new(path)?))
    }

    #[cfg(not(feature = "file-repo"))]
    pub fn create_file(path: PathBuf) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        Err(RepositoryError::configuration_with_context(
            "File repository feature not enabled",
            ErrorContext::new("create_file").with_details(path.display().to_string()),
        ))
    }

    /// Create repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn ForecastRepository>> {
        let data_file = std::env::var_os(DATA_FILE_ENV).map(PathBuf::from);
        Self::create(RepositoryType::from_env(), data_file.as_deref())
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn ForecastRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create the repository a [`RepositorySource`] points at.
    ///
    /// A `Fallback(File)` source opens `forecasts.json` in the working
    /// directory.
    pub fn from_source(source: &RepositorySource) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        match source {
            RepositorySource::ConfigFile(path) => Self::from_config_file(path),
            RepositorySource::Environment => Self::from_env(),
            RepositorySource::DefaultConfig(path) => {
                log::info!("Using repository configuration {}", path.display());
                Self::from_config_file(path)
            }
            RepositorySource::Fallback(repo_type) => {
                log::debug!("No repository configured; using {:?} repository", repo_type);
                Self::create(*repo_type, None)
            }
        }
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn ForecastRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Invalid repository type: {}", e),
                ErrorContext::new("from_repository_config"),
            )
        })?;
        Self::create(repo_type, Some(config.file.path.as_path()))
    }
}
