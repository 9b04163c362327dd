//! Input validation errors.
//!
//! Raised wherever untyped data (raw integers, sector-key strings, stored
//! columns, JSON documents) crosses into the typed domain. The risk engine
//! itself only ever sees validated values and never fails.

/// Result alias for boundary parsing.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A value that does not belong to its closed domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("likelihood must be between 1 and 5, got {0}")]
    LikelihoodOutOfRange(i64),

    #[error("size must be between 1 and 5, got {0}")]
    SizeOutOfRange(i64),

    #[error("danger level must be between 1 and 5, got {0}")]
    DangerLevelOutOfRange(i64),

    #[error("unknown elevation band '{0}' (expected alp, tl or btl)")]
    UnknownBand(String),

    #[error("unknown direction '{0}' (expected N, NE, E, SE, S, SW, W or NW)")]
    UnknownDirection(String),

    #[error("malformed sector key '{0}' (expected <band>_<direction>, e.g. alp_N)")]
    MalformedSectorKey(String),

    #[error("sector list is not a JSON array of strings: {0}")]
    MalformedSectorList(String),

    #[error("unknown avalanche problem type '{0}'")]
    UnknownProblemType(String),

    #[error("unknown forecast status '{0}' (expected draft or published)")]
    UnknownStatus(String),

    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    /// Name of the offending field, where one applies.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::LikelihoodOutOfRange(_) => Some("likelihood"),
            Self::SizeOutOfRange(_) => Some("size"),
            Self::DangerLevelOutOfRange(_) => Some("danger"),
            Self::UnknownBand(_)
            | Self::UnknownDirection(_)
            | Self::MalformedSectorKey(_)
            | Self::MalformedSectorList(_) => Some("sectors"),
            Self::UnknownProblemType(_) => Some("problem_type"),
            Self::UnknownStatus(_) => Some("status"),
            Self::MissingField { field } | Self::EmptyField { field } => Some(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_offending_value() {
        let err = ValidationError::LikelihoodOutOfRange(7);
        assert_eq!(err.to_string(), "likelihood must be between 1 and 5, got 7");

        let err = ValidationError::MalformedSectorKey("alpN".into());
        assert!(err.to_string().contains("alpN"));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ValidationError::SizeOutOfRange(0).field(), Some("size"));
        assert_eq!(
            ValidationError::UnknownDirection("NNE".into()).field(),
            Some("sectors")
        );
        assert_eq!(
            ValidationError::EmptyField { field: "region" }.field(),
            Some("region")
        );
    }
}
