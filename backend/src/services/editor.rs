//! Draft editing.
//!
//! [`ForecastEditor`] applies one field change at a time to a forecast and
//! re-derives the per-band ratings after each change, the way an editing UI
//! refreshes its danger display on every keystroke or click.

use crate::models::{
    AvalancheProblem, DangerRatings, Forecast, LikelihoodLevel, ProblemSlot, ProblemType,
    SectorKey, SizeLevel,
};

/// A forecast under edit.
#[derive(Debug, Clone)]
pub struct ForecastEditor {
    forecast: Forecast,
}

impl ForecastEditor {
    /// Start editing `forecast`. Ratings are recomputed immediately.
    pub fn new(mut forecast: Forecast) -> Self {
        forecast.recompute_danger();
        Self { forecast }
    }

    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    pub fn danger(&self) -> DangerRatings {
        self.forecast.danger
    }

    pub fn problem(&self, slot: ProblemSlot) -> Option<&AvalancheProblem> {
        self.forecast.problem(slot)
    }

    fn edit_problem(
        &mut self,
        slot: ProblemSlot,
        f: impl FnOnce(&mut AvalancheProblem),
    ) -> DangerRatings {
        f(self.forecast.problem_mut(slot));
        self.forecast.recompute_danger()
    }

    pub fn set_problem_type(
        &mut self,
        slot: ProblemSlot,
        problem_type: ProblemType,
    ) -> DangerRatings {
        self.edit_problem(slot, |p| p.problem_type = problem_type)
    }

    pub fn set_likelihood(
        &mut self,
        slot: ProblemSlot,
        likelihood: LikelihoodLevel,
    ) -> DangerRatings {
        self.edit_problem(slot, |p| p.likelihood = likelihood)
    }

    pub fn set_size(&mut self, slot: ProblemSlot, size: SizeLevel) -> DangerRatings {
        self.edit_problem(slot, |p| p.size = size)
    }

    /// Flip one sector on the terrain selector.
    pub fn toggle_sector(&mut self, slot: ProblemSlot, key: SectorKey) -> DangerRatings {
        self.edit_problem(slot, |p| {
            p.sectors.toggle(key);
        })
    }

    pub fn insert_sector(&mut self, slot: ProblemSlot, key: SectorKey) -> DangerRatings {
        self.edit_problem(slot, |p| {
            p.sectors.insert(key);
        })
    }

    pub fn clear_sectors(&mut self, slot: ProblemSlot) -> DangerRatings {
        self.edit_problem(slot, |p| p.sectors.clear())
    }

    pub fn set_description(
        &mut self,
        slot: ProblemSlot,
        description: impl Into<String>,
    ) -> DangerRatings {
        let description = description.into();
        self.edit_problem(slot, |p| p.description = description)
    }

    /// Include or exclude the secondary problem from the ratings.
    ///
    /// Enabling creates a default secondary problem when none exists.
    pub fn set_secondary_enabled(&mut self, enabled: bool) -> DangerRatings {
        if enabled {
            self.forecast.problem_mut(ProblemSlot::Secondary);
        }
        self.forecast.secondary_enabled = enabled;
        self.forecast.recompute_danger()
    }

    /// Replace the headline advice. Ratings are unaffected and returned as-is.
    pub fn set_bottom_line(&mut self, bottom_line: impl Into<String>) -> DangerRatings {
        self.forecast.bottom_line = bottom_line.into();
        self.forecast.danger
    }

    /// Finish editing and hand back the forecast with current ratings.
    pub fn finish(mut self) -> Forecast {
        self.forecast.recompute_danger();
        self.forecast
    }
}

impl From<Forecast> for ForecastEditor {
    fn from(forecast: Forecast) -> Self {
        Self::new(forecast)
    }
}
