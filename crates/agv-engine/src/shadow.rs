//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "shadow-model"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Solar-noon shadow geometry cast by the panel array."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Shadow geometry model.
//!
//! Single solar-noon sample per day using a simplified declination and
//! elevation approximation. This is a declared simplification of the real
//! sun path: no intra-day sampling, no azimuthal projection, and negative
//! tangent arguments floor the shadow at zero.

use tracing::debug;

use agv_model::{PanelConfiguration, Result, ShadowReport, SimulationError, WeatherRecord};

/// Shadow geometry for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyShadow {
    pub length_m: f64,
    pub width_m: f64,
    pub area_sqm: f64,
    /// Fraction of field_size in shade, [0, 1].
    pub coverage: f64,
}

/// Solar declination in degrees for a day of year.
pub fn solar_declination(day_of_year: u32) -> f64 {
    23.45 * (360.0 / 365.0 * (f64::from(day_of_year) - 81.0)).to_radians().sin()
}

/// Noon solar elevation in degrees at the given latitude.
pub fn solar_elevation(latitude: f64, day_of_year: u32) -> f64 {
    90.0 - latitude + solar_declination(day_of_year)
}

/// Shadow cast at solar noon on a single day.
pub fn daily_shadow(
    config: &PanelConfiguration,
    latitude: f64,
    day_of_year: u32,
) -> DailyShadow {
    let elevation = solar_elevation(latitude, day_of_year);
    let incidence = 90.0 - elevation - config.panel_angle;
    let length_m = (config.panel_height * incidence.to_radians().tan()).max(0.0);
    let width_m = config.panel_width + length_m * config.panel_angle.to_radians().sin();
    let area_sqm = width_m * f64::from(config.panel_rows) * f64::from(config.panels_per_row);
    let coverage = (area_sqm / config.field_size).min(1.0);
    DailyShadow {
        length_m,
        width_m,
        area_sqm,
        coverage,
    }
}

/// Runs the shadow model over a weather series.
///
/// Day-of-year indexing follows the series position, wrapping at 365, so
/// multi-year series repeat the annual sun path.
pub fn compute_shadow_report(
    config: &PanelConfiguration,
    latitude: f64,
    series: &[WeatherRecord],
) -> Result<ShadowReport> {
    if series.is_empty() {
        return Err(SimulationError::invalid("empty weather series"));
    }
    config.validate()?;

    let mut lengths = Vec::with_capacity(series.len());
    let mut areas = Vec::with_capacity(series.len());
    let mut coverages = Vec::with_capacity(series.len());
    for index in 0..series.len() {
        let day_of_year = (index % 365) as u32;
        let day = daily_shadow(config, latitude, day_of_year);
        lengths.push(day.length_m);
        areas.push(day.area_sqm);
        coverages.push(day.coverage);
    }

    let count = lengths.len() as f64;
    let average = lengths.iter().sum::<f64>() / count;
    let maximum = lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let minimum = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let average_coverage = coverages.iter().sum::<f64>() / count;
    debug!(days = lengths.len(), average_length_m = average, "shadow model complete");

    Ok(ShadowReport {
        average_shadow_length_m: average,
        maximum_shadow_length_m: maximum,
        minimum_shadow_length_m: minimum,
        average_shadow_coverage_percent: average_coverage * 100.0,
        daily_shadow_lengths_m: lengths,
        daily_shadow_areas_sqm: areas,
        daily_shadow_coverage: coverages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agv_model::Location;
    use agv_weather::SyntheticWeather;
    use chrono::NaiveDate;

    fn series(days: u32) -> Vec<WeatherRecord> {
        SyntheticWeather::default()
            .generate(
                Location::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                days,
            )
            .unwrap()
    }

    #[test]
    fn declination_peaks_near_solstices() {
        assert!(solar_declination(172) > 23.0);
        assert!(solar_declination(355) < -23.0);
        assert!(solar_declination(81).abs() < 0.5);
    }

    #[test]
    fn near_solstice_shadow_is_short_and_non_negative() {
        let config = PanelConfiguration::default();
        let summer = daily_shadow(&config, 40.0, 172);
        let winter = daily_shadow(&config, 40.0, 355);
        assert!(summer.length_m >= 0.0);
        assert!(winter.length_m > summer.length_m);
    }

    #[test]
    fn overhead_sun_floors_shadow_at_zero() {
        let mut config = PanelConfiguration::default();
        config.panel_angle = 45.0;
        // Low latitude in summer pushes the incidence argument negative.
        let day = daily_shadow(&config, 10.0, 172);
        assert_eq!(day.length_m, 0.0);
        assert_eq!(day.width_m, config.panel_width);
    }

    #[test]
    fn coverage_stays_fractional_for_any_geometry() {
        let mut config = PanelConfiguration::default();
        config.panel_height = 4.0;
        config.panel_rows = 50;
        config.panels_per_row = 50;
        config.field_size = 100.0;
        for latitude in [-60.0, 0.0, 40.0, 60.0] {
            for day_of_year in [0, 80, 172, 355] {
                let day = daily_shadow(&config, latitude, day_of_year);
                assert!((0.0..=1.0).contains(&day.coverage));
            }
        }
    }

    #[test]
    fn report_is_idempotent_across_calls() {
        let config = PanelConfiguration::default();
        let weather = series(90);
        let a = compute_shadow_report(&config, 40.0, &weather).unwrap();
        let b = compute_shadow_report(&config, 40.0, &weather).unwrap();
        assert_eq!(a.daily_shadow_lengths_m, b.daily_shadow_lengths_m);
        assert_eq!(a.average_shadow_coverage_percent, b.average_shadow_coverage_percent);
    }

    #[test]
    fn summary_brackets_daily_values() {
        let config = PanelConfiguration::default();
        let report = compute_shadow_report(&config, 40.0, &series(365)).unwrap();
        assert_eq!(report.daily_shadow_lengths_m.len(), 365);
        assert!(report.minimum_shadow_length_m <= report.average_shadow_length_m);
        assert!(report.average_shadow_length_m <= report.maximum_shadow_length_m);
        for coverage in &report.daily_shadow_coverage {
            assert!((0.0..=1.0).contains(coverage));
        }
    }
}
