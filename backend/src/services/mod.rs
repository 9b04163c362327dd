//! Services built on the risk engine.
//!
//! - [`editor`]: field-by-field draft editing with live ratings
//! - [`report`]: presentation summaries of a forecast

pub mod editor;
pub mod report;

pub use editor::ForecastEditor;
pub use report::{AspectRow, BandReport, DangerConfig, ForecastReport, ProblemReport};
