//! ---
//! agv_section: "03-weather-provider"
//! agv_subsection: "cache-store"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "File-backed cache of daily weather records keyed by location and date."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Local weather cache.
//!
//! One JSON file per (location, date) pair under
//! `<root>/<lat>_<lon>/<date>.json`. Coordinates are rounded to four
//! decimals in the directory name so nearby lookups hit the same cache
//! bucket. Saving never overwrites an existing day.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use tracing::debug;
use walkdir::WalkDir;

use agv_model::{Location, Result, SimulationError, WeatherRecord};

/// Minimum fraction of requested days the cache must hold before the
/// series is served from disk instead of being re-fetched.
pub const COVERAGE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct WeatherStore {
    root: PathBuf,
}

impl WeatherStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn location_dir(&self, location: Location) -> PathBuf {
        self.root.join(format!(
            "{:.4}_{:.4}",
            location.latitude, location.longitude
        ))
    }

    fn record_path(&self, location: Location, date: NaiveDate) -> PathBuf {
        self.location_dir(location).join(format!("{date}.json"))
    }

    /// Persists a series, skipping days already cached.
    pub fn save_series(&self, series: &[WeatherRecord]) -> Result<usize> {
        let mut written = 0;
        for record in series {
            let path = self.record_path(record.location(), record.date);
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let body = serde_json::to_vec_pretty(record)?;
            fs::write(&path, body)?;
            written += 1;
        }
        debug!(written, total = series.len(), "weather cache updated");
        Ok(written)
    }

    /// Loads whatever the cache holds for the requested window, sorted by date.
    pub fn load_range(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        let dir = self.location_dir(location);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let end = start + Duration::days(i64::from(days) - 1);
        let mut found = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                SimulationError::ComputationFailure(format!("weather cache walk: {e}"))
            })?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(date) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<NaiveDate>().ok())
            else {
                continue;
            };
            if date < start || date > end {
                continue;
            }
            let body = fs::read(path)?;
            let record: WeatherRecord = serde_json::from_slice(&body)?;
            found.push(record);
        }
        found.sort_by_key(|r| r.date);
        Ok(found)
    }

    /// True when the cache covers enough of the window to be served as-is.
    pub fn covers(&self, location: Location, start: NaiveDate, days: u32) -> Result<bool> {
        if days == 0 {
            return Ok(false);
        }
        let found = self.load_range(location, start, days)?;
        Ok(found.len() as f64 / f64::from(days) >= COVERAGE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticWeather;
    use tempfile::TempDir;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn round_trips_a_series() {
        let dir = TempDir::new().unwrap();
        let store = WeatherStore::new(dir.path());
        let series = SyntheticWeather::default()
            .generate(Location::default(), start(), 10)
            .unwrap();

        assert_eq!(store.save_series(&series).unwrap(), 10);
        let loaded = store.load_range(Location::default(), start(), 10).unwrap();
        assert_eq!(loaded.len(), 10);
        assert_eq!(loaded[0].date, start());
        assert_eq!(loaded[0].temperature_high, series[0].temperature_high);
    }

    #[test]
    fn save_skips_already_cached_days() {
        let dir = TempDir::new().unwrap();
        let store = WeatherStore::new(dir.path());
        let series = SyntheticWeather::default()
            .generate(Location::default(), start(), 5)
            .unwrap();
        assert_eq!(store.save_series(&series).unwrap(), 5);
        assert_eq!(store.save_series(&series).unwrap(), 0);
    }

    #[test]
    fn coverage_threshold_applies() {
        let dir = TempDir::new().unwrap();
        let store = WeatherStore::new(dir.path());
        let series = SyntheticWeather::default()
            .generate(Location::default(), start(), 7)
            .unwrap();
        store.save_series(&series).unwrap();

        assert!(store.covers(Location::default(), start(), 7).unwrap());
        // 7 of 10 days cached is below the 80% threshold.
        assert!(!store.covers(Location::default(), start(), 10).unwrap());
    }

    #[test]
    fn distinct_locations_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let store = WeatherStore::new(dir.path());
        let here = Location::default();
        let there = Location::new(52.52, 13.40);
        let series = SyntheticWeather::default().generate(here, start(), 3).unwrap();
        store.save_series(&series).unwrap();

        assert!(store.load_range(there, start(), 3).unwrap().is_empty());
    }
}
