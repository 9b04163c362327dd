//! Rating scales: danger, likelihood and size.
//!
//! All three are closed 1..=5 scales. They serialize as bare integers so the
//! persistence columns and JSON documents carry plain numbers.

use serde::{Deserialize, Serialize};

use super::terrain::ElevationBand;

crate::define_rating_scale! {
    /// Public avalanche danger level, 1 (lowest) to 5 (highest).
    DangerLevel, DangerLevelOutOfRange {
        Low = 1 => "Low",
        Moderate = 2 => "Moderate",
        Considerable = 3 => "Considerable",
        High = 4 => "High",
        Extreme = 5 => "Extreme",
    }
}

crate::define_rating_scale! {
    /// How likely an avalanche problem is to be triggered.
    LikelihoodLevel, LikelihoodOutOfRange {
        Unlikely = 1 => "Unlikely",
        Possible = 2 => "Possible",
        Likely = 3 => "Likely",
        VeryLikely = 4 => "Very Likely",
        Certain = 5 => "Certain",
    }
}

crate::define_rating_scale! {
    /// How large and destructive a triggered avalanche would be.
    SizeLevel, SizeOutOfRange {
        Small = 1 => "Small",
        Large = 2 => "Large",
        VeryLarge = 3 => "Very Large",
        Historic = 4 => "Historic",
        Catastrophic = 5 => "Catastrophic",
    }
}

impl Default for DangerLevel {
    fn default() -> Self {
        DangerLevel::Low
    }
}

/// One danger level per elevation band.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DangerRatings {
    pub alp: DangerLevel,
    pub tl: DangerLevel,
    pub btl: DangerLevel,
}

impl DangerRatings {
    pub fn new(alp: DangerLevel, tl: DangerLevel, btl: DangerLevel) -> Self {
        Self { alp, tl, btl }
    }

    /// Level rated for `band`.
    pub fn get(&self, band: ElevationBand) -> DangerLevel {
        match band {
            ElevationBand::Alp => self.alp,
            ElevationBand::Tl => self.tl,
            ElevationBand::Btl => self.btl,
        }
    }

    pub fn set(&mut self, band: ElevationBand, level: DangerLevel) {
        match band {
            ElevationBand::Alp => self.alp = level,
            ElevationBand::Tl => self.tl = level,
            ElevationBand::Btl => self.btl = level,
        }
    }

    /// Highest level across the three bands.
    pub fn highest(&self) -> DangerLevel {
        self.alp.max(self.tl).max(self.btl)
    }

    /// `(band, level)` pairs from the highest band down.
    pub fn iter(&self) -> impl Iterator<Item = (ElevationBand, DangerLevel)> + '_ {
        ElevationBand::ALL
            .into_iter()
            .map(move |band| (band, self.get(band)))
    }
}
