//! Tests for the wire shapes exchanged with front ends.

mod support;

use avalanche_forecast::api::*;
use serde_json::json;
use support::{problem, sample_forecast, sectors};

#[test]
fn test_problem_serializes_with_integer_ratings() {
    let problem = AvalancheProblem::new(
        ProblemType::StormSlab,
        LikelihoodLevel::Likely,
        SizeLevel::VeryLarge,
    )
    .with_sectors(sectors(&["tl_S", "alp_N"]))
    .with_description("Fresh storm snow");

    let value = serde_json::to_value(&problem).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "storm_slab",
            "likelihood": 3,
            "size": 3,
            "sectors": ["alp_N", "tl_S"],
            "description": "Fresh storm snow"
        })
    );
}

#[test]
fn test_problem_optional_fields_default() {
    let problem: AvalancheProblem =
        serde_json::from_value(json!({"type": "cornice", "likelihood": 1, "size": 5})).unwrap();
    assert_eq!(problem.problem_type, ProblemType::Cornice);
    assert!(problem.sectors.is_empty());
    assert!(problem.description.is_empty());
}

#[test]
fn test_duplicate_sector_keys_collapse() {
    let problem: AvalancheProblem = serde_json::from_value(json!({
        "type": "glide",
        "likelihood": 2,
        "size": 2,
        "sectors": ["btl_SE", "btl_SE", "btl_E"]
    }))
    .unwrap();
    assert_eq!(problem.sectors.len(), 2);
}

#[test]
fn test_unknown_problem_type_rejected() {
    let result: Result<AvalancheProblem, _> =
        serde_json::from_value(json!({"type": "slush", "likelihood": 2, "size": 2}));
    assert!(result.is_err());
}

#[test]
fn test_danger_ratings_shape() {
    let ratings = DangerRatings::new(DangerLevel::High, DangerLevel::Moderate, DangerLevel::Low);
    assert_eq!(
        serde_json::to_value(ratings).unwrap(),
        json!({"alp": 4, "tl": 2, "btl": 1})
    );

    let result: Result<DangerRatings, _> =
        serde_json::from_value(json!({"alp": 0, "tl": 2, "btl": 1}));
    assert!(result.is_err());
}

#[test]
fn test_forecast_json_round_trip() {
    let mut forecast = sample_forecast("Kootenay Boundary", 7);
    forecast.id = Some(ForecastId::new(12));
    forecast.secondary = Some(problem(2, 3, &["btl_W"]));
    forecast.secondary_enabled = true;
    forecast.recompute_danger();

    let text = serde_json::to_string(&forecast).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["id"], 12);
    assert_eq!(value["status"], "draft");
    assert_eq!(value["forecast_date"], "2025-01-07");
    assert_eq!(value["danger"], json!({"alp": 3, "tl": 3, "btl": 3}));

    let back: Forecast = serde_json::from_str(&text).unwrap();
    assert_eq!(back, forecast);
}

#[test]
fn test_forecast_info_shape() {
    let info = ForecastInfo {
        forecast_id: ForecastId::new(3),
        region: "Purcells".to_string(),
        forecast_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        status: ForecastStatus::Published,
        danger: DangerRatings::default(),
    };
    assert_eq!(
        serde_json::to_value(&info).unwrap(),
        json!({
            "forecast_id": 3,
            "region": "Purcells",
            "forecast_date": "2025-03-01",
            "status": "published",
            "danger": {"alp": 1, "tl": 1, "btl": 1}
        })
    );
}

#[test]
fn test_risk_response_shape() {
    let request = RiskRequest {
        primary: problem(5, 5, &["tl_W"]),
        secondary: None,
        secondary_enabled: true,
    };
    assert_eq!(
        serde_json::to_value(request.evaluate()).unwrap(),
        json!({"danger": {"alp": 1, "tl": 5, "btl": 1}, "highest": 5})
    );
}

#[test]
fn test_report_json_carries_palette() {
    let report = ForecastReport::from_forecast(&sample_forecast("Glacier", 2));
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["highest"], 3);
    assert_eq!(value["bands"][0]["color"], "#F7941E");
}

#[test]
fn test_sector_key_display_matches_wire_form() {
    for band in ElevationBand::ALL {
        for direction in Direction::ALL {
            let key = SectorKey::new(band, direction);
            let parsed: SectorKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }
}
