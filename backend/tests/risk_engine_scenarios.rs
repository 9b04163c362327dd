//! Danger derivation through the public API: matrix lookups, per-band
//! aggregation and the boundary checks in front of them.

mod support;

use avalanche_forecast::algorithms::{calculate_risk, risk_level, risk_level_checked, RISK_MATRIX};
use avalanche_forecast::api::RiskRequest;
use avalanche_forecast::models::{
    DangerLevel, DangerRatings, LikelihoodLevel, SectorSet, SizeLevel, ValidationError,
};
use support::problem;

fn levels(ratings: DangerRatings) -> (u8, u8, u8) {
    (ratings.alp.value(), ratings.tl.value(), ratings.btl.value())
}

#[test]
fn test_matrix_corners_and_center() {
    assert_eq!(risk_level_checked(5, 5).unwrap(), DangerLevel::Extreme);
    assert_eq!(risk_level_checked(1, 1).unwrap(), DangerLevel::Low);
    assert_eq!(risk_level_checked(3, 3).unwrap(), DangerLevel::Considerable);
    assert_eq!(RISK_MATRIX[2][2], DangerLevel::Considerable);
}

#[test]
fn test_matrix_row_layout() {
    // Rows run from Certain down to Unlikely.
    let certain: Vec<u8> = SizeLevel::ALL
        .iter()
        .map(|&s| risk_level(LikelihoodLevel::Certain, s).value())
        .collect();
    assert_eq!(certain, vec![3, 4, 4, 5, 5]);

    let unlikely: Vec<u8> = SizeLevel::ALL
        .iter()
        .map(|&s| risk_level(LikelihoodLevel::Unlikely, s).value())
        .collect();
    assert_eq!(unlikely, vec![1, 1, 2, 3, 3]);
}

#[test]
fn test_primary_only_alpine() {
    let primary = problem(4, 2, &["alp_N", "alp_NE"]);
    assert_eq!(levels(calculate_risk(&primary, None, false)), (3, 1, 1));
}

#[test]
fn test_secondary_only_below_treeline() {
    let primary = problem(3, 3, &[]);
    let secondary = problem(2, 1, &["btl_S"]);
    assert_eq!(
        levels(calculate_risk(&primary, Some(&secondary), true)),
        (1, 1, 1)
    );
}

#[test]
fn test_primary_dominates_shared_band() {
    let primary = problem(5, 5, &["tl_W"]);
    let secondary = problem(1, 1, &["tl_W"]);
    assert_eq!(
        levels(calculate_risk(&primary, Some(&secondary), true)),
        (1, 5, 1)
    );
}

#[test]
fn test_higher_secondary_wins_shared_band() {
    let primary = problem(1, 2, &["alp_S"]);
    let secondary = problem(4, 4, &["alp_S", "alp_SW"]);
    assert_eq!(
        levels(calculate_risk(&primary, Some(&secondary), true)),
        (4, 1, 1)
    );
    assert_eq!(
        levels(calculate_risk(&primary, Some(&secondary), false)),
        (1, 1, 1)
    );
}

#[test]
fn test_whole_rose_selected() {
    let mut primary = problem(2, 3, &[]);
    primary.sectors = SectorSet::all();
    assert_eq!(levels(calculate_risk(&primary, None, false)), (3, 3, 3));
}

#[test]
fn test_out_of_range_ratings_rejected_before_lookup() {
    assert_eq!(
        risk_level_checked(0, 3),
        Err(ValidationError::LikelihoodOutOfRange(0))
    );
    assert_eq!(
        risk_level_checked(3, 6),
        Err(ValidationError::SizeOutOfRange(6))
    );
}

#[test]
fn test_risk_request_from_editor_json() {
    let request: RiskRequest = serde_json::from_str(
        r#"{
            "primary": {
                "type": "storm_slab",
                "likelihood": 4,
                "size": 2,
                "sectors": ["alp_N", "alp_NE"],
                "description": "New snow and wind"
            },
            "secondary": {
                "type": "persistent_slab",
                "likelihood": 2,
                "size": 4,
                "sectors": ["tl_E", "btl_E"]
            },
            "secondary_enabled": true
        }"#,
    )
    .unwrap();

    let response = request.evaluate();
    assert_eq!(levels(response.danger), (3, 3, 3));
    assert_eq!(response.highest, DangerLevel::Considerable);
}

#[test]
fn test_risk_request_rejects_bad_ratings() {
    let err = serde_json::from_str::<RiskRequest>(
        r#"{"primary": {"type": "wind_slab", "likelihood": 6, "size": 2}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("likelihood"));

    let err = serde_json::from_str::<RiskRequest>(
        r#"{"primary": {"type": "wind_slab", "likelihood": 3, "size": 2, "sectors": ["alpN"]}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("alpN"));
}
