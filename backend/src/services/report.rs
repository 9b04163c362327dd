//! Forecast summaries for publication.
//!
//! Turns a [`Forecast`] into a presentation-ready [`ForecastReport`]: per-band
//! rows with the public danger-scale label and colour, the highest rating,
//! and the contributing problems with their aspects grouped by band.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DangerLevel, Direction, ElevationBand, Forecast, ForecastStatus};

/// Presentation attributes of one danger level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DangerConfig {
    pub level: DangerLevel,
    pub label: &'static str,
    /// Hex colour of the public danger scale
    pub color: &'static str,
    pub travel_advice: &'static str,
}

const DANGER_TABLE: [DangerConfig; 5] = [
    DangerConfig {
        level: DangerLevel::Low,
        label: "Low",
        color: "#52BA4A",
        travel_advice: "Generally safe avalanche conditions. Watch for unstable snow on isolated terrain features.",
    },
    DangerConfig {
        level: DangerLevel::Moderate,
        label: "Moderate",
        color: "#FFF300",
        travel_advice: "Heightened avalanche conditions on specific terrain features. Evaluate snow and terrain carefully; identify features of concern.",
    },
    DangerConfig {
        level: DangerLevel::Considerable,
        label: "Considerable",
        color: "#F7941E",
        travel_advice: "Dangerous avalanche conditions. Careful snowpack evaluation, cautious route-finding and conservative decision-making essential.",
    },
    DangerConfig {
        level: DangerLevel::High,
        label: "High",
        color: "#ED1C24",
        travel_advice: "Very dangerous avalanche conditions. Travel in avalanche terrain not recommended.",
    },
    DangerConfig {
        level: DangerLevel::Extreme,
        label: "Extreme",
        color: "#231F20",
        travel_advice: "Avoid all avalanche terrain.",
    },
];

impl DangerConfig {
    pub fn for_level(level: DangerLevel) -> &'static DangerConfig {
        &DANGER_TABLE[usize::from(level.value() - 1)]
    }

    pub fn all() -> &'static [DangerConfig] {
        &DANGER_TABLE
    }
}

/// One elevation band's rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandReport {
    pub band: ElevationBand,
    pub band_label: String,
    pub elevation_range: String,
    pub level: DangerLevel,
    pub label: String,
    pub color: String,
}

/// Selected aspects within one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectRow {
    pub band: ElevationBand,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    /// "primary" or "secondary"
    pub slot: String,
    pub problem_type: String,
    pub likelihood: String,
    pub size: String,
    pub risk: DangerLevel,
    pub aspects: Vec<AspectRow>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub region: String,
    pub forecast_date: NaiveDate,
    pub author: String,
    pub status: ForecastStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub bottom_line: String,
    pub bands: Vec<BandReport>,
    pub highest: DangerLevel,
    pub highest_label: String,
    pub travel_advice: String,
    pub problems: Vec<ProblemReport>,
}

impl ForecastReport {
    /// Build a report from the forecast's stored ratings.
    pub fn from_forecast(forecast: &Forecast) -> Self {
        let bands = forecast
            .danger
            .iter()
            .map(|(band, level)| {
                let config = DangerConfig::for_level(level);
                BandReport {
                    band,
                    band_label: band.label().to_string(),
                    elevation_range: band.elevation_range().to_string(),
                    level,
                    label: config.label.to_string(),
                    color: config.color.to_string(),
                }
            })
            .collect();

        let problems = forecast
            .active_problems()
            .map(|(slot, problem)| ProblemReport {
                slot: slot.as_str().to_string(),
                problem_type: problem.problem_type.label().to_string(),
                likelihood: problem.likelihood.label().to_string(),
                size: problem.size.label().to_string(),
                risk: crate::algorithms::risk_level(problem.likelihood, problem.size),
                aspects: ElevationBand::ALL
                    .into_iter()
                    .filter(|&band| problem.sectors.has_band(band))
                    .map(|band| AspectRow {
                        band,
                        directions: problem.sectors.directions_in(band).collect(),
                    })
                    .collect(),
                description: problem.description.clone(),
            })
            .collect();

        let highest = forecast.danger.highest();
        let highest_config = DangerConfig::for_level(highest);

        Self {
            region: forecast.region.clone(),
            forecast_date: forecast.forecast_date,
            author: forecast.author.clone(),
            status: forecast.status,
            published_at: forecast.published_at,
            bottom_line: forecast.bottom_line.clone(),
            bands,
            highest,
            highest_label: highest_config.label.to_string(),
            travel_advice: highest_config.travel_advice.to_string(),
            problems,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ForecastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Avalanche forecast: {} ({}, {})",
            self.region, self.forecast_date, self.status
        )?;
        if !self.author.is_empty() {
            writeln!(f, "Forecaster: {}", self.author)?;
        }
        if let Some(published_at) = self.published_at {
            writeln!(
                f,
                "Published: {}",
                published_at.format("%Y-%m-%d %H:%M UTC")
            )?;
        }
        writeln!(f)?;

        for band in &self.bands {
            writeln!(
                f,
                "  {:<26} {} - {:<13} {}",
                format!("{} ({})", band.band_label, band.elevation_range),
                band.level.value(),
                band.label,
                band.color
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Highest danger: {} - {}",
            self.highest.value(),
            self.highest_label
        )?;
        writeln!(f, "{}", self.travel_advice)?;

        if !self.bottom_line.is_empty() {
            writeln!(f)?;
            writeln!(f, "Bottom line: {}", self.bottom_line)?;
        }

        for problem in &self.problems {
            writeln!(f)?;
            writeln!(
                f,
                "[{}] {}: {}, {} (risk {})",
                problem.slot,
                problem.problem_type,
                problem.likelihood,
                problem.size,
                problem.risk.value()
            )?;
            if problem.aspects.is_empty() {
                writeln!(f, "    no aspects selected")?;
            }
            for row in &problem.aspects {
                let directions: Vec<&str> = row.directions.iter().map(|d| d.as_str()).collect();
                writeln!(f, "    {}: {}", row.band.label(), directions.join(", "))?;
            }
            if !problem.description.is_empty() {
                writeln!(f, "    {}", problem.description)?;
            }
        }
        Ok(())
    }
}
