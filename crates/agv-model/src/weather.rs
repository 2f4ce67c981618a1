//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Geographic point a weather series is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: 40.0,
            longitude: -75.0,
        }
    }
}

/// One calendar day of weather at a location, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    /// Daily maximum temperature (deg C).
    pub temperature_high: f64,
    /// Daily minimum temperature (deg C).
    pub temperature_low: f64,
    /// Relative humidity, percent in [0, 100].
    pub humidity: f64,
    /// Daily precipitation sum (mm, >= 0).
    pub precipitation: f64,
    /// Cloud cover fraction in [0, 1].
    pub cloud_cover: f64,
    /// Mean wind speed (m/s, >= 0).
    pub wind_speed: f64,
    /// Mean wind direction (degrees from North, 0-360).
    pub wind_direction: f64,
    /// Global solar radiation (kWh/m2/day, >= 0).
    pub solar_radiation: f64,
}

impl WeatherRecord {
    pub fn temperature_avg(&self) -> f64 {
        (self.temperature_high + self.temperature_low) / 2.0
    }

    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(SimulationError::invalid(format!(
                "humidity {} outside [0, 100] on {}",
                self.humidity, self.date
            )));
        }
        if !(0.0..=1.0).contains(&self.cloud_cover) {
            return Err(SimulationError::invalid(format!(
                "cloud cover {} outside [0, 1] on {}",
                self.cloud_cover, self.date
            )));
        }
        if self.precipitation < 0.0 {
            return Err(SimulationError::invalid(format!(
                "negative precipitation on {}",
                self.date
            )));
        }
        if self.solar_radiation < 0.0 {
            return Err(SimulationError::invalid(format!(
                "negative solar radiation on {}",
                self.date
            )));
        }
        Ok(())
    }
}

/// Validate an entire series before any model consumes it.
pub fn validate_series(series: &[WeatherRecord]) -> Result<()> {
    if series.is_empty() {
        return Err(SimulationError::invalid("empty weather series"));
    }
    for record in series {
        record.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            latitude: 40.0,
            longitude: -75.0,
            temperature_high: 28.0,
            temperature_low: 16.0,
            humidity: 55.0,
            precipitation: 0.0,
            cloud_cover: 0.2,
            wind_speed: 4.0,
            wind_direction: 180.0,
            solar_radiation: 6.5,
        }
    }

    #[test]
    fn average_temperature_is_midpoint() {
        assert_eq!(record().temperature_avg(), 22.0);
    }

    #[test]
    fn humidity_out_of_range_is_rejected() {
        let mut bad = record();
        bad.humidity = 130.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn cloud_cover_must_be_fractional() {
        let mut bad = record();
        bad.cloud_cover = 1.5;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn empty_series_is_invalid() {
        assert!(validate_series(&[]).is_err());
    }
}
