//! Persistence row shape for forecasts.
//!
//! Problem sectors are stored as JSON arrays of sector-key strings (e.g.
//! `["alp_N","tl_W"]`) and derived danger as three integer columns, so stored
//! data keeps the flat column layout of a relational forecast table.
//! Every read goes through [`ForecastRecord::into_forecast`], which validates
//! each column before the typed [`Forecast`] exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ForecastInfo;
use crate::models::{
    AvalancheProblem, DangerLevel, DangerRatings, Forecast, ForecastId, ForecastStatus,
    LikelihoodLevel, SectorSet, SizeLevel, ValidationError, ValidationResult,
};

/// One stored forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub forecast_id: i64,
    pub region: String,
    pub forecast_date: NaiveDate,
    pub author: String,
    pub bottom_line: String,
    pub status: String,
    pub primary_type: String,
    pub primary_likelihood: i64,
    pub primary_size: i64,
    pub primary_sectors: String,
    pub primary_description: String,
    pub secondary_enabled: bool,
    pub secondary_type: Option<String>,
    pub secondary_likelihood: Option<i64>,
    pub secondary_size: Option<i64>,
    pub secondary_sectors: Option<String>,
    pub secondary_description: Option<String>,
    pub danger_alp: i64,
    pub danger_tl: i64,
    pub danger_btl: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ForecastRecord {
    /// Encode `forecast` under the given identifier.
    pub fn from_forecast(forecast: &Forecast, forecast_id: ForecastId) -> Self {
        let secondary = forecast.secondary.as_ref();
        Self {
            forecast_id: forecast_id.value(),
            region: forecast.region.clone(),
            forecast_date: forecast.forecast_date,
            author: forecast.author.clone(),
            bottom_line: forecast.bottom_line.clone(),
            status: forecast.status.as_str().to_string(),
            primary_type: forecast.primary.problem_type.as_str().to_string(),
            primary_likelihood: i64::from(forecast.primary.likelihood.value()),
            primary_size: i64::from(forecast.primary.size.value()),
            primary_sectors: forecast.primary.sectors.to_json(),
            primary_description: forecast.primary.description.clone(),
            secondary_enabled: forecast.secondary_enabled,
            secondary_type: secondary.map(|p| p.problem_type.as_str().to_string()),
            secondary_likelihood: secondary.map(|p| i64::from(p.likelihood.value())),
            secondary_size: secondary.map(|p| i64::from(p.size.value())),
            secondary_sectors: secondary.map(|p| p.sectors.to_json()),
            secondary_description: secondary.map(|p| p.description.clone()),
            danger_alp: i64::from(forecast.danger.alp.value()),
            danger_tl: i64::from(forecast.danger.tl.value()),
            danger_btl: i64::from(forecast.danger.btl.value()),
            created_at: forecast.created_at,
            updated_at: forecast.updated_at,
            published_at: forecast.published_at,
        }
    }

    pub fn id(&self) -> ForecastId {
        ForecastId::new(self.forecast_id)
    }

    /// Decode and validate into the domain type.
    ///
    /// Stored danger columns are range-checked and kept as stored, not
    /// recomputed.
    pub fn into_forecast(self) -> ValidationResult<Forecast> {
        let primary = AvalancheProblem {
            problem_type: self.primary_type.parse()?,
            likelihood: LikelihoodLevel::from_value(self.primary_likelihood)?,
            size: SizeLevel::from_value(self.primary_size)?,
            sectors: SectorSet::from_json(&self.primary_sectors)?,
            description: self.primary_description,
        };

        let secondary = match self.secondary_type {
            None => None,
            Some(problem_type) => Some(AvalancheProblem {
                problem_type: problem_type.parse()?,
                likelihood: LikelihoodLevel::from_value(
                    self.secondary_likelihood
                        .ok_or(ValidationError::MissingField {
                            field: "secondary_likelihood",
                        })?,
                )?,
                size: SizeLevel::from_value(
                    self.secondary_size
                        .ok_or(ValidationError::MissingField {
                            field: "secondary_size",
                        })?,
                )?,
                sectors: match self.secondary_sectors {
                    Some(json) => SectorSet::from_json(&json)?,
                    None => SectorSet::new(),
                },
                description: self.secondary_description.unwrap_or_default(),
            }),
        };

        let forecast = Forecast {
            id: Some(ForecastId::new(self.forecast_id)),
            region: self.region,
            forecast_date: self.forecast_date,
            author: self.author,
            bottom_line: self.bottom_line,
            primary,
            secondary,
            secondary_enabled: self.secondary_enabled,
            status: self.status.parse()?,
            danger: decode_danger(self.danger_alp, self.danger_tl, self.danger_btl)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
        };
        forecast.validate()?;
        Ok(forecast)
    }

    /// Decode only the listing columns.
    pub fn to_info(&self) -> ValidationResult<ForecastInfo> {
        Ok(ForecastInfo {
            forecast_id: self.id(),
            region: self.region.clone(),
            forecast_date: self.forecast_date,
            status: self.status.parse::<ForecastStatus>()?,
            danger: decode_danger(self.danger_alp, self.danger_tl, self.danger_btl)?,
        })
    }
}

fn decode_danger(alp: i64, tl: i64, btl: i64) -> ValidationResult<DangerRatings> {
    Ok(DangerRatings::new(
        DangerLevel::from_value(alp)?,
        DangerLevel::from_value(tl)?,
        DangerLevel::from_value(btl)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProblemType, SectorKey};

    fn sample_forecast() -> Forecast {
        let mut forecast = Forecast::draft(
            "Rogers Pass",
            NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(),
            "forecaster",
        );
        forecast.primary = AvalancheProblem::new(
            ProblemType::StormSlab,
            LikelihoodLevel::VeryLikely,
            SizeLevel::Large,
        )
        .with_sectors(["alp_N", "alp_NE"].map(|k| k.parse::<SectorKey>().unwrap()));
        forecast.secondary_enabled = true;
        forecast.secondary = Some(
            AvalancheProblem::new(
                ProblemType::PersistentSlab,
                LikelihoodLevel::Possible,
                SizeLevel::VeryLarge,
            )
            .with_sectors(["tl_E".parse::<SectorKey>().unwrap()])
            .with_description("Buried surface hoar"),
        );
        forecast.recompute_danger();
        forecast
    }

    #[test]
    fn test_record_columns() {
        let forecast = sample_forecast();
        let record = ForecastRecord::from_forecast(&forecast, ForecastId::new(7));

        assert_eq!(record.forecast_id, 7);
        assert_eq!(record.status, "draft");
        assert_eq!(record.primary_type, "storm_slab");
        assert_eq!(record.primary_sectors, r#"["alp_N","alp_NE"]"#);
        assert_eq!(record.secondary_sectors.as_deref(), Some(r#"["tl_E"]"#));
        assert_eq!(
            (record.danger_alp, record.danger_tl, record.danger_btl),
            (3, 3, 1)
        );
    }

    #[test]
    fn test_record_decodes_back() {
        let forecast = sample_forecast();
        let record = ForecastRecord::from_forecast(&forecast, ForecastId::new(7));
        let decoded = record.into_forecast().unwrap();

        assert_eq!(decoded.id, Some(ForecastId::new(7)));
        assert_eq!(decoded.primary, forecast.primary);
        assert_eq!(decoded.secondary, forecast.secondary);
        assert_eq!(decoded.danger, forecast.danger);
    }

    #[test]
    fn test_absent_secondary_is_null_columns() {
        let mut forecast = sample_forecast();
        forecast.secondary = None;
        forecast.secondary_enabled = false;
        let record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        assert!(record.secondary_type.is_none());
        assert!(record.secondary_sectors.is_none());
        assert!(record.into_forecast().unwrap().secondary.is_none());
    }

    #[test]
    fn test_rejects_out_of_range_columns() {
        let forecast = sample_forecast();

        let mut record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        record.primary_likelihood = 9;
        assert_eq!(
            record.into_forecast(),
            Err(ValidationError::LikelihoodOutOfRange(9))
        );

        let mut record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        record.danger_tl = 0;
        assert_eq!(
            record.into_forecast(),
            Err(ValidationError::DangerLevelOutOfRange(0))
        );

        let mut record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        record.status = "archived".into();
        assert!(record.to_info().is_err());
    }

    #[test]
    fn test_rejects_bad_sector_json() {
        let forecast = sample_forecast();
        let mut record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        record.primary_sectors = r#"["alp_N","mid_S"]"#.into();
        assert_eq!(
            record.into_forecast(),
            Err(ValidationError::UnknownBand("mid".into()))
        );
    }

    #[test]
    fn test_partial_secondary_columns_are_rejected() {
        let forecast = sample_forecast();
        let mut record = ForecastRecord::from_forecast(&forecast, ForecastId::new(1));
        record.secondary_size = None;
        assert_eq!(
            record.into_forecast(),
            Err(ValidationError::MissingField {
                field: "secondary_size"
            })
        );
    }

    #[test]
    fn test_to_info() {
        let forecast = sample_forecast();
        let record = ForecastRecord::from_forecast(&forecast, ForecastId::new(3));
        let info = record.to_info().unwrap();
        assert_eq!(info.forecast_id, ForecastId::new(3));
        assert_eq!(info.region, "Rogers Pass");
        assert_eq!(info.status, ForecastStatus::Draft);
        assert_eq!(info.danger, forecast.danger);
    }
}
