//! ---
//! agv_section: "03-weather-provider"
//! agv_subsection: "archive-client"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Open-Meteo historical archive client with hourly-to-daily aggregation."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Open-Meteo historical archive client.
//!
//! Queries the archive endpoint for daily temperature extremes plus hourly
//! humidity, cloud cover, precipitation and shortwave radiation, then folds
//! the hourly rows into one [`WeatherRecord`] per day. The archive reports
//! no wind for this product, so wind fields carry fixed defaults.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use agv_model::{Location, Result, SimulationError, WeatherRecord};

pub const DEFAULT_BASE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const DEFAULT_WIND_SPEED: f64 = 5.0;
const DEFAULT_WIND_DIRECTION: f64 = 180.0;

#[derive(Debug, Clone)]
pub struct OpenMeteoArchive {
    client: reqwest::Client,
    base_url: String,
}

impl Default for OpenMeteoArchive {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
    #[serde(default)]
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    /// Minute-resolution ISO stamps like `2024-06-01T10:00`; only the
    /// date prefix matters for daily aggregation.
    time: Vec<String>,
    #[serde(default)]
    relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    shortwave_radiation: Vec<Option<f64>>,
}

#[derive(Debug, Default)]
struct DayAccumulator {
    temperature_high: Option<f64>,
    temperature_low: Option<f64>,
    humidity: Vec<f64>,
    cloud_cover: Vec<f64>,
    precipitation: f64,
    radiation: Vec<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl OpenMeteoArchive {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches and aggregates one record per day in `[start, start + days)`.
    pub async fn fetch(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        if days == 0 {
            return Err(SimulationError::invalid("days must be greater than zero"));
        }
        let end = start + Duration::days(i64::from(days) - 1);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min".to_string(),
                ),
                (
                    "hourly",
                    "relative_humidity_2m,cloud_cover,precipitation,shortwave_radiation"
                        .to_string(),
                ),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| SimulationError::UpstreamUnavailable(format!("archive request: {e}")))?
            .error_for_status()
            .map_err(|e| SimulationError::UpstreamUnavailable(format!("archive status: {e}")))?;

        let payload: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| SimulationError::UpstreamUnavailable(format!("archive payload: {e}")))?;

        let series = aggregate(location, payload)?;
        debug!(days = series.len(), "archive series fetched");
        if series.is_empty() {
            return Err(SimulationError::UpstreamUnavailable(
                "archive returned no data for the requested window".into(),
            ));
        }
        Ok(series)
    }
}

fn aggregate(location: Location, payload: ArchiveResponse) -> Result<Vec<WeatherRecord>> {
    let mut by_date: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    if let Some(daily) = payload.daily {
        for (idx, date) in daily.time.iter().enumerate() {
            let acc = by_date.entry(*date).or_default();
            acc.temperature_high = daily.temperature_2m_max.get(idx).copied().flatten();
            acc.temperature_low = daily.temperature_2m_min.get(idx).copied().flatten();
        }
    }

    if let Some(hourly) = payload.hourly {
        for (idx, stamp) in hourly.time.iter().enumerate() {
            let Some(date) = stamp.get(..10).and_then(|s| s.parse::<NaiveDate>().ok()) else {
                continue;
            };
            let acc = by_date.entry(date).or_default();
            if let Some(v) = hourly.relative_humidity_2m.get(idx).copied().flatten() {
                acc.humidity.push(v);
            }
            if let Some(v) = hourly.cloud_cover.get(idx).copied().flatten() {
                acc.cloud_cover.push(v);
            }
            if let Some(v) = hourly.precipitation.get(idx).copied().flatten() {
                acc.precipitation += v;
            }
            if let Some(v) = hourly.shortwave_radiation.get(idx).copied().flatten() {
                acc.radiation.push(v);
            }
        }
    }

    let mut series = Vec::with_capacity(by_date.len());
    for (date, acc) in by_date {
        // The archive reports cloud cover in percent and radiation in W/m2;
        // the model wants a fraction and kWh/m2/day.
        let cloud_cover = mean(&acc.cloud_cover).map_or(0.3, |pct| pct / 100.0);
        let solar_radiation = mean(&acc.radiation).map_or(5.0, |w| w * 24.0 / 1000.0);
        series.push(WeatherRecord {
            date,
            latitude: location.latitude,
            longitude: location.longitude,
            temperature_high: acc.temperature_high.unwrap_or(25.0),
            temperature_low: acc.temperature_low.unwrap_or(15.0),
            humidity: mean(&acc.humidity).unwrap_or(50.0).clamp(0.0, 100.0),
            precipitation: acc.precipitation,
            cloud_cover: cloud_cover.clamp(0.0, 1.0),
            wind_speed: DEFAULT_WIND_SPEED,
            wind_direction: DEFAULT_WIND_DIRECTION,
            solar_radiation,
        });
    }
    Ok(series)
}
