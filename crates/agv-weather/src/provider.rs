//! ---
//! agv_section: "03-weather-provider"
//! agv_subsection: "provider-seam"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Provider trait and the cache/archive/synthetic resolution cascade."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Series resolution.
//!
//! [`resolve_series`] is the single entry point the rest of the system
//! uses: serve from the cache when it covers enough of the window, fetch
//! from the archive otherwise, and fall back to synthetic generation when
//! the archive is disabled or unreachable. The fallback means resolution
//! only fails on invalid input, never on network weather.

use chrono::NaiveDate;
use tracing::{info, warn};

use agv_common::config::WeatherConfig;
use agv_model::{Location, Result, SimulationError, WeatherRecord};

use crate::archive::OpenMeteoArchive;
use crate::store::WeatherStore;
use crate::synthetic::SyntheticWeather;

/// A source that can produce a contiguous daily series on demand.
pub trait WeatherProvider {
    fn series(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> impl std::future::Future<Output = Result<Vec<WeatherRecord>>> + Send;
}

impl WeatherProvider for SyntheticWeather {
    async fn series(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        self.generate(location, start, days)
    }
}

impl WeatherProvider for OpenMeteoArchive {
    async fn series(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        self.fetch(location, start, days).await
    }
}

/// Bundles the three sources behind one configured facade.
#[derive(Debug, Clone)]
pub struct WeatherService {
    store: WeatherStore,
    archive: OpenMeteoArchive,
    synthetic: SyntheticWeather,
    archive_enabled: bool,
}

impl WeatherService {
    pub fn from_config(config: &WeatherConfig) -> Self {
        Self {
            store: WeatherStore::new(&config.cache_directory),
            archive: OpenMeteoArchive::default(),
            synthetic: SyntheticWeather::new(config.synthetic_seed),
            archive_enabled: config.archive_enabled,
        }
    }

    pub fn store(&self) -> &WeatherStore {
        &self.store
    }

    /// Resolves a series for the window, preferring cache, then archive,
    /// then deterministic synthesis.
    pub async fn resolve(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        if days == 0 {
            return Err(SimulationError::invalid("days must be greater than zero"));
        }

        if self.store.covers(location, start, days)? {
            let cached = self.store.load_range(location, start, days)?;
            info!(days = cached.len(), "weather series served from cache");
            return Ok(cached);
        }

        if self.archive_enabled {
            match self.archive.series(location, start, days).await {
                Ok(series) => {
                    self.store.save_series(&series)?;
                    info!(days = series.len(), "weather series fetched from archive");
                    return Ok(series);
                }
                Err(err) => {
                    warn!(error = %err, "archive unavailable, generating synthetic weather");
                }
            }
        }

        let series = self.synthetic.series(location, start, days).await?;
        info!(
            days = series.len(),
            seed = self.synthetic.seed(),
            "weather series generated synthetically"
        );
        Ok(series)
    }
}

/// Convenience wrapper used by the orchestrator and the CLI.
pub async fn resolve_series(
    config: &WeatherConfig,
    location: Location,
    start: NaiveDate,
    days: u32,
) -> Result<Vec<WeatherRecord>> {
    WeatherService::from_config(config).resolve(location, start, days).await
}
