//! Per-band danger aggregation from a forecast's avalanche problems.

use crate::models::{AvalancheProblem, DangerLevel, DangerRatings, ElevationBand, SectorSet};

use super::risk_matrix::risk_level;

/// True iff `sectors` has at least one member in `band`.
pub fn has_sector_in_band(sectors: &SectorSet, band: ElevationBand) -> bool {
    sectors.has_band(band)
}

/// Derive one danger level per elevation band.
///
/// Each band starts at [`DangerLevel::Low`] and is raised to a problem's
/// matrix risk when that problem has a sector in the band. The secondary
/// problem only counts when `secondary_enabled` is set and it is present.
pub fn calculate_risk(
    primary: &AvalancheProblem,
    secondary: Option<&AvalancheProblem>,
    secondary_enabled: bool,
) -> DangerRatings {
    let primary_risk = risk_level(primary.likelihood, primary.size);
    let secondary = secondary.filter(|_| secondary_enabled);
    let secondary_risk = secondary
        .map(|p| risk_level(p.likelihood, p.size))
        .unwrap_or(DangerLevel::Low);

    let mut ratings = DangerRatings::default();
    for band in ElevationBand::ALL {
        let mut max_risk = DangerLevel::Low;
        if has_sector_in_band(&primary.sectors, band) {
            max_risk = max_risk.max(primary_risk);
        }
        if let Some(problem) = secondary {
            if has_sector_in_band(&problem.sectors, band) {
                max_risk = max_risk.max(secondary_risk);
            }
        }
        ratings.set(band, max_risk);
    }
    ratings
}
