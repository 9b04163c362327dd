//! Terrain addressing: elevation bands, compass directions and sectors.
//!
//! A sector is one (band, direction) cell of the terrain rose. The 24 cells
//! map onto bits `band * 8 + direction` of a [`SectorSet`], so membership,
//! insertion and the per-band test are all single mask operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationResult};

/// Elevation band rated independently by a forecast.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationBand {
    /// Alpine, above 2200 m.
    Alp,
    /// Treeline, 1800 m to 2200 m.
    Tl,
    /// Below treeline, under 1800 m.
    Btl,
}

impl ElevationBand {
    /// Bands from highest to lowest.
    pub const ALL: [ElevationBand; 3] = [ElevationBand::Alp, ElevationBand::Tl, ElevationBand::Btl];

    pub fn as_str(self) -> &'static str {
        match self {
            ElevationBand::Alp => "alp",
            ElevationBand::Tl => "tl",
            ElevationBand::Btl => "btl",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElevationBand::Alp => "Alpine",
            ElevationBand::Tl => "Treeline",
            ElevationBand::Btl => "Below Treeline",
        }
    }

    pub fn elevation_range(self) -> &'static str {
        match self {
            ElevationBand::Alp => ">2200m",
            ElevationBand::Tl => "1800-2200m",
            ElevationBand::Btl => "<1800m",
        }
    }

    fn index(self) -> u32 {
        match self {
            ElevationBand::Alp => 0,
            ElevationBand::Tl => 1,
            ElevationBand::Btl => 2,
        }
    }
}

impl fmt::Display for ElevationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElevationBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alp" => Ok(ElevationBand::Alp),
            "tl" => Ok(ElevationBand::Tl),
            "btl" => Ok(ElevationBand::Btl),
            other => Err(ValidationError::UnknownBand(other.to_string())),
        }
    }
}

/// Compass aspect.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }

    fn index(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDirection(s.to_string()))
    }
}

/// One cell of the terrain rose, written `"{band}_{direction}"` on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectorKey {
    pub band: ElevationBand,
    pub direction: Direction,
}

impl SectorKey {
    pub fn new(band: ElevationBand, direction: Direction) -> Self {
        Self { band, direction }
    }

    fn bit(self) -> u32 {
        1 << (self.band.index() * 8 + self.direction.index())
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.band, self.direction)
    }
}

impl FromStr for SectorKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (band, direction) = s
            .split_once('_')
            .ok_or_else(|| ValidationError::MalformedSectorKey(s.to_string()))?;
        Ok(SectorKey::new(band.parse()?, direction.parse()?))
    }
}

impl TryFrom<String> for SectorKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectorKey> for String {
    fn from(key: SectorKey) -> String {
        key.to_string()
    }
}

const BAND_LANE: u32 = 0xFF;
const ALL_SECTORS: u32 = (1 << 24) - 1;

/// Set of sectors where an avalanche problem is present.
///
/// Serialized as a JSON array of sector-key strings in canonical order
/// (bands high to low, directions clockwise from north). Duplicate keys on
/// input collapse.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<SectorKey>", into = "Vec<SectorKey>")]
pub struct SectorSet(u32);

impl SectorSet {
    pub const fn new() -> Self {
        SectorSet(0)
    }

    /// Every sector of the rose.
    pub const fn all() -> Self {
        SectorSet(ALL_SECTORS)
    }

    /// Every direction of one band.
    pub fn whole_band(band: ElevationBand) -> Self {
        SectorSet(BAND_LANE << (band.index() * 8))
    }

    /// Adds `key`. Returns `false` if it was already present.
    pub fn insert(&mut self, key: SectorKey) -> bool {
        let added = self.0 & key.bit() == 0;
        self.0 |= key.bit();
        added
    }

    /// Removes `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: SectorKey) -> bool {
        let present = self.contains(key);
        self.0 &= !key.bit();
        present
    }

    /// Flips membership of `key`. Returns whether it is present afterwards.
    pub fn toggle(&mut self, key: SectorKey) -> bool {
        self.0 ^= key.bit();
        self.contains(key)
    }

    pub fn contains(&self, key: SectorKey) -> bool {
        self.0 & key.bit() != 0
    }

    /// True iff at least one member lies in `band`.
    pub fn has_band(&self, band: ElevationBand) -> bool {
        (self.0 >> (band.index() * 8)) & BAND_LANE != 0
    }

    /// Directions selected within `band`, clockwise from north.
    pub fn directions_in(&self, band: ElevationBand) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.contains(SectorKey::new(band, d)))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = SectorKey> + '_ {
        ElevationBand::ALL.into_iter().flat_map(move |band| {
            self.directions_in(band)
                .map(move |direction| SectorKey::new(band, direction))
        })
    }

    /// Encodes the set as the persisted JSON array of sector-key strings.
    pub fn to_json(&self) -> String {
        serde_json::Value::Array(
            self.iter()
                .map(|key| serde_json::Value::String(key.to_string()))
                .collect(),
        )
        .to_string()
    }

    /// Decodes a persisted JSON array of sector-key strings.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let keys: Vec<String> = serde_json::from_str(json)
            .map_err(|e| ValidationError::MalformedSectorList(e.to_string()))?;
        keys.iter().map(|k| k.parse::<SectorKey>()).collect()
    }
}

impl FromIterator<SectorKey> for SectorSet {
    fn from_iter<I: IntoIterator<Item = SectorKey>>(iter: I) -> Self {
        let mut set = SectorSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<SectorKey> for SectorSet {
    fn extend<I: IntoIterator<Item = SectorKey>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl From<Vec<SectorKey>> for SectorSet {
    fn from(keys: Vec<SectorKey>) -> Self {
        keys.into_iter().collect()
    }
}

impl From<SectorSet> for Vec<SectorKey> {
    fn from(set: SectorSet) -> Self {
        set.iter().collect()
    }
}
