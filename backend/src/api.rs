//! Public API surface.
//!
//! Consolidates the request/response types exchanged with front ends (the
//! editing UI, the CLI).

pub use crate::models::{
    AvalancheProblem, DangerLevel, DangerRatings, Direction, ElevationBand, Forecast, ForecastId,
    ForecastStatus, LikelihoodLevel, ProblemSlot, ProblemType, SectorKey, SectorSet, SizeLevel,
    ValidationError,
};
pub use crate::services::report::{
    AspectRow, BandReport, DangerConfig, ForecastReport, ProblemReport,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithms::calculate_risk;

/// Lightweight forecast listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastInfo {
    pub forecast_id: ForecastId,
    pub region: String,
    pub forecast_date: NaiveDate,
    pub status: ForecastStatus,
    pub danger: DangerRatings,
}

/// Problems to rate, as sent by an editing front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    pub primary: AvalancheProblem,
    #[serde(default)]
    pub secondary: Option<AvalancheProblem>,
    #[serde(default)]
    pub secondary_enabled: bool,
}

/// Derived ratings for a [`RiskRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResponse {
    pub danger: DangerRatings,
    pub highest: DangerLevel,
}

impl RiskRequest {
    /// Rate the request's problems.
    pub fn evaluate(&self) -> RiskResponse {
        let danger = calculate_risk(
            &self.primary,
            self.secondary.as_ref(),
            self.secondary_enabled,
        );
        RiskResponse {
            danger,
            highest: danger.highest(),
        }
    }
}
