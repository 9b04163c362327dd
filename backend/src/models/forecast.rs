//! Forecast entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::danger::DangerRatings;
use super::error::ValidationError;
use super::problem::{AvalancheProblem, ProblemSlot};
use crate::algorithms::calculate_risk;

crate::define_id_type!(i64, ForecastId);

/// Publication state of a forecast.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastStatus {
    #[default]
    Draft,
    Published,
}

impl ForecastStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ForecastStatus::Draft => "draft",
            ForecastStatus::Published => "published",
        }
    }
}

impl fmt::Display for ForecastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ForecastStatus::Draft),
            "published" => Ok(ForecastStatus::Published),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A regional avalanche forecast for one day.
///
/// `danger` always holds the ratings last derived from the problems; it is
/// refreshed by [`Forecast::recompute_danger`] and by every editor operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Database identifier (`None` until stored)
    pub id: Option<ForecastId>,
    pub region: String,
    pub forecast_date: NaiveDate,
    pub author: String,
    /// Headline travel advice
    pub bottom_line: String,
    pub primary: AvalancheProblem,
    pub secondary: Option<AvalancheProblem>,
    pub secondary_enabled: bool,
    pub status: ForecastStatus,
    pub danger: DangerRatings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Forecast {
    /// Open a new draft with default problems and the secondary disabled.
    pub fn draft(
        region: impl Into<String>,
        forecast_date: NaiveDate,
        author: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            region: region.into(),
            forecast_date,
            author: author.into(),
            bottom_line: String::new(),
            primary: AvalancheProblem::default(),
            secondary: Some(AvalancheProblem::default()),
            secondary_enabled: false,
            status: ForecastStatus::Draft,
            danger: DangerRatings::default(),
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    /// Re-derive `danger` from the current problems.
    pub fn recompute_danger(&mut self) -> DangerRatings {
        self.danger = calculate_risk(
            &self.primary,
            self.secondary.as_ref(),
            self.secondary_enabled,
        );
        self.danger
    }

    pub fn problem(&self, slot: ProblemSlot) -> Option<&AvalancheProblem> {
        match slot {
            ProblemSlot::Primary => Some(&self.primary),
            ProblemSlot::Secondary => self.secondary.as_ref(),
        }
    }

    /// Mutable access to a problem, creating a default secondary if absent.
    pub fn problem_mut(&mut self, slot: ProblemSlot) -> &mut AvalancheProblem {
        match slot {
            ProblemSlot::Primary => &mut self.primary,
            ProblemSlot::Secondary => self.secondary.get_or_insert_with(AvalancheProblem::default),
        }
    }

    /// Problems that contribute to the ratings, primary first.
    pub fn active_problems(&self) -> impl Iterator<Item = (ProblemSlot, &AvalancheProblem)> {
        let secondary = self
            .secondary
            .as_ref()
            .filter(|_| self.secondary_enabled)
            .map(|p| (ProblemSlot::Secondary, p));
        std::iter::once((ProblemSlot::Primary, &self.primary)).chain(secondary)
    }

    pub fn is_published(&self) -> bool {
        self.status == ForecastStatus::Published
    }

    /// Check the free-form fields a store would reject.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.region.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "region" });
        }
        Ok(())
    }
}
