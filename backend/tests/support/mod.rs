//! Shared helpers for integration tests.

use std::collections::HashSet;
use std::sync::Mutex;

use avalanche_forecast::models::{
    AvalancheProblem, Forecast, LikelihoodLevel, ProblemType, SectorKey, SizeLevel,
};
use chrono::NaiveDate;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
#[allow(dead_code)]
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Parse sector keys, panicking on malformed test input.
#[allow(dead_code)]
pub fn sectors(keys: &[&str]) -> Vec<SectorKey> {
    keys.iter()
        .map(|k| k.parse().expect("valid sector key"))
        .collect()
}

/// A problem from raw 1-5 ratings.
#[allow(dead_code)]
pub fn problem(likelihood: i64, size: i64, keys: &[&str]) -> AvalancheProblem {
    AvalancheProblem::new(
        ProblemType::PersistentSlab,
        LikelihoodLevel::from_value(likelihood).expect("likelihood in range"),
        SizeLevel::from_value(size).expect("size in range"),
    )
    .with_sectors(sectors(keys))
}

/// A draft with a rated primary problem.
#[allow(dead_code)]
pub fn sample_forecast(region: &str, day: u32) -> Forecast {
    let mut forecast = Forecast::draft(
        region,
        NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date"),
        "integration",
    );
    forecast.primary = problem(4, 2, &["alp_N", "alp_NE", "tl_N"]);
    forecast.bottom_line = "Wind slabs near ridgetops".to_string();
    forecast.recompute_danger();
    forecast
}
