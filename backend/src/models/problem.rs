//! Avalanche problems: the hazard mechanisms a forecast describes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::danger::{LikelihoodLevel, SizeLevel};
use super::error::ValidationError;
use super::terrain::{SectorKey, SectorSet};

/// Avalanche mechanism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    DryLoose,
    WetLoose,
    StormSlab,
    WindSlab,
    PersistentSlab,
    DeepPersistentSlab,
    WetSlab,
    Cornice,
    Glide,
}

impl ProblemType {
    pub const ALL: [ProblemType; 9] = [
        ProblemType::DryLoose,
        ProblemType::WetLoose,
        ProblemType::StormSlab,
        ProblemType::WindSlab,
        ProblemType::PersistentSlab,
        ProblemType::DeepPersistentSlab,
        ProblemType::WetSlab,
        ProblemType::Cornice,
        ProblemType::Glide,
    ];

    /// Stored/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::DryLoose => "dry_loose",
            ProblemType::WetLoose => "wet_loose",
            ProblemType::StormSlab => "storm_slab",
            ProblemType::WindSlab => "wind_slab",
            ProblemType::PersistentSlab => "persistent_slab",
            ProblemType::DeepPersistentSlab => "deep_persistent_slab",
            ProblemType::WetSlab => "wet_slab",
            ProblemType::Cornice => "cornice",
            ProblemType::Glide => "glide",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProblemType::DryLoose => "Dry Loose",
            ProblemType::WetLoose => "Wet Loose",
            ProblemType::StormSlab => "Storm Slab",
            ProblemType::WindSlab => "Wind Slab",
            ProblemType::PersistentSlab => "Persistent Slab",
            ProblemType::DeepPersistentSlab => "Deep Persistent Slab",
            ProblemType::WetSlab => "Wet Slab",
            ProblemType::Cornice => "Cornice",
            ProblemType::Glide => "Glide",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        ProblemType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownProblemType(s.to_string()))
    }
}

/// Which of a forecast's two problems an edit addresses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemSlot {
    Primary,
    Secondary,
}

impl ProblemSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemSlot::Primary => "primary",
            ProblemSlot::Secondary => "secondary",
        }
    }
}

impl FromStr for ProblemSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "1" => Ok(ProblemSlot::Primary),
            "secondary" | "2" => Ok(ProblemSlot::Secondary),
            other => Err(format!("Unknown problem slot: {}", other)),
        }
    }
}

/// A hazard mechanism with its likelihood, size and affected sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvalancheProblem {
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub likelihood: LikelihoodLevel,
    pub size: SizeLevel,
    #[serde(default)]
    pub sectors: SectorSet,
    #[serde(default)]
    pub description: String,
}

impl Default for AvalancheProblem {
    /// Values a freshly opened draft starts from.
    fn default() -> Self {
        Self {
            problem_type: ProblemType::WindSlab,
            likelihood: LikelihoodLevel::Possible,
            size: SizeLevel::Large,
            sectors: SectorSet::new(),
            description: String::new(),
        }
    }
}

impl AvalancheProblem {
    pub fn new(problem_type: ProblemType, likelihood: LikelihoodLevel, size: SizeLevel) -> Self {
        Self {
            problem_type,
            likelihood,
            size,
            ..Default::default()
        }
    }

    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = SectorKey>) -> Self {
        self.sectors.extend(sectors);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_type_parse_is_forgiving_about_spelling() {
        assert_eq!(
            "wind_slab".parse::<ProblemType>().unwrap(),
            ProblemType::WindSlab
        );
        assert_eq!(
            "Wind Slab".parse::<ProblemType>().unwrap(),
            ProblemType::WindSlab
        );
        assert_eq!(
            "deep-persistent-slab".parse::<ProblemType>().unwrap(),
            ProblemType::DeepPersistentSlab
        );
        assert_eq!(
            "slush".parse::<ProblemType>(),
            Err(ValidationError::UnknownProblemType("slush".into()))
        );
    }

    #[test]
    fn test_problem_type_names_round_trip() {
        for t in ProblemType::ALL {
            assert_eq!(t.as_str().parse::<ProblemType>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn test_slot_parse() {
        assert_eq!(
            "primary".parse::<ProblemSlot>().unwrap(),
            ProblemSlot::Primary
        );
        assert_eq!(
            "Secondary".parse::<ProblemSlot>().unwrap(),
            ProblemSlot::Secondary
        );
        assert!("tertiary".parse::<ProblemSlot>().is_err());
    }

    #[test]
    fn test_default_problem_has_no_sectors() {
        let problem = AvalancheProblem::default();
        assert!(problem.sectors.is_empty());
        assert!(problem.description.is_empty());
    }

    #[test]
    fn test_problem_json_shape() {
        let problem = AvalancheProblem::new(
            ProblemType::StormSlab,
            LikelihoodLevel::Likely,
            SizeLevel::VeryLarge,
        )
        .with_sectors(["alp_N".parse::<SectorKey>().unwrap()])
        .with_description("Fresh storm snow");

        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "storm_slab",
                "likelihood": 3,
                "size": 3,
                "sectors": ["alp_N"],
                "description": "Fresh storm snow"
            })
        );

        let parsed: AvalancheProblem =
            serde_json::from_str(r#"{"type":"glide","likelihood":1,"size":2}"#).unwrap();
        assert_eq!(parsed.problem_type, ProblemType::Glide);
        assert!(parsed.sectors.is_empty());
    }

    #[test]
    fn test_problem_json_rejects_out_of_range_likelihood() {
        let err = serde_json::from_str::<AvalancheProblem>(
            r#"{"type":"glide","likelihood":6,"size":2}"#,
        );
        assert!(err.is_err());
    }
}
