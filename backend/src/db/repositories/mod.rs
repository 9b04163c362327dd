//! Repository implementations.
//!
//! - `local`: in-memory storage for tests and local development
//! - `json_file`: single JSON document on disk (feature `file-repo`)
pub mod local;
#[cfg(feature = "file-repo")]
pub mod json_file;

#[cfg(feature = "file-repo")]
pub use json_file::JsonFileRepository;
pub use local::LocalRepository;
