//! # Avalanche Forecast Backend
//!
//! Danger-rating engine for public avalanche bulletins.
//!
//! A forecaster describes up to two avalanche problems, each with a
//! likelihood, a destructive size and the terrain sectors (elevation band ×
//! aspect) where it applies. The engine maps each problem through a 5×5 risk
//! matrix and rates every elevation band with the highest risk among the
//! problems that reach it.
//!
//! ## Architecture
//!
//! - [`models`]: rating scales, terrain sectors, problems and forecasts
//! - [`algorithms`]: risk matrix and per-band aggregation
//! - [`services`]: draft editing and publication reports
//! - [`db`]: repository pattern, storage backends and the service layer
//! - [`api`]: request/response types for front ends

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod db;
pub mod models;
pub mod services;
