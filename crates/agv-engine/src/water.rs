//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "water-model"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Evapotranspiration, irrigation need and shade-driven water savings."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Water balance model.
//!
//! Hargreaves-style reference evapotranspiration from daily temperature
//! extremes, scaled by the crop coefficient. Totals convert mm over the
//! field to cubic meters. Partial shade reduces soil evaporation, credited
//! as water savings proportional to average coverage.

use tracing::debug;

use agv_model::{CropProfile, PanelConfiguration, Result, SimulationError, WaterReport, WeatherRecord};

/// Reference evapotranspiration in mm/day.
pub fn reference_evapotranspiration(day: &WeatherRecord) -> f64 {
    let spread = (day.temperature_high - day.temperature_low).max(0.0);
    0.0023 * (day.temperature_avg() + 17.8) * spread.sqrt() * 6.0
}

fn mm_to_cubic_m(mm: f64, field_size: f64) -> f64 {
    mm * field_size / 1000.0
}

/// Runs the water model over a weather series.
///
/// `average_coverage` is the mean shadow coverage fraction from the shadow
/// model, used to credit reduced evaporation under the panels.
pub fn compute_water_report(
    config: &PanelConfiguration,
    crop: &CropProfile,
    series: &[WeatherRecord],
    average_coverage: f64,
) -> Result<WaterReport> {
    if series.is_empty() {
        return Err(SimulationError::invalid("empty weather series"));
    }
    config.validate()?;
    crop.validate()?;

    let mut daily_needs = Vec::with_capacity(series.len());
    let mut daily_precipitation = Vec::with_capacity(series.len());
    let mut total_etc_mm = 0.0;
    for day in series {
        let etc = reference_evapotranspiration(day) * config.crop_coefficient;
        total_etc_mm += etc;
        daily_needs.push((etc - day.precipitation).max(0.0));
        daily_precipitation.push(day.precipitation);
    }

    let total_requirement = mm_to_cubic_m(total_etc_mm, config.field_size);
    // Delivery losses mean more water is pumped than the crop needs.
    let total_irrigation = mm_to_cubic_m(daily_needs.iter().sum::<f64>(), config.field_size)
        / config.irrigation_efficiency;
    let total_precipitation =
        mm_to_cubic_m(daily_precipitation.iter().sum::<f64>(), config.field_size);

    let savings =
        total_requirement * average_coverage * config.evaporation_reduction_factor;
    let savings_percent = if total_requirement > 0.0 {
        savings / total_requirement * 100.0
    } else {
        0.0
    };
    debug!(
        requirement_cubic_m = total_requirement,
        savings_cubic_m = savings,
        "water model complete"
    );

    Ok(WaterReport {
        total_water_requirement_cubic_m: total_requirement,
        total_irrigation_volume_cubic_m: total_irrigation,
        total_precipitation_cubic_m: total_precipitation,
        water_savings_from_panels_cubic_m: savings,
        water_savings_percent: savings_percent,
        daily_irrigation_needs_mm: daily_needs,
        daily_precipitation_mm: daily_precipitation,
        irrigation_efficiency: config.irrigation_efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(high: f64, low: f64, precipitation: f64) -> WeatherRecord {
        WeatherRecord {
            date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            latitude: 40.0,
            longitude: -75.0,
            temperature_high: high,
            temperature_low: low,
            humidity: 50.0,
            precipitation,
            cloud_cover: 0.2,
            wind_speed: 3.0,
            wind_direction: 180.0,
            solar_radiation: 6.0,
        }
    }

    #[test]
    fn hargreaves_matches_hand_computation() {
        let d = day(30.0, 18.0, 0.0);
        let expected = 0.0023 * (24.0 + 17.8) * 12.0_f64.sqrt() * 6.0;
        assert!((reference_evapotranspiration(&d) - expected).abs() < 1e-12);
    }

    #[test]
    fn rain_offsets_irrigation_need() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("lettuce").unwrap();
        let wet = vec![day(28.0, 16.0, 50.0); 5];
        let report = compute_water_report(&config, &crop, &wet, 0.0).unwrap();
        for need in &report.daily_irrigation_needs_mm {
            assert_eq!(*need, 0.0);
        }
        assert_eq!(report.total_irrigation_volume_cubic_m, 0.0);
    }

    #[test]
    fn savings_scale_with_coverage() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("lettuce").unwrap();
        let series = vec![day(30.0, 18.0, 0.0); 30];
        let none = compute_water_report(&config, &crop, &series, 0.0).unwrap();
        let half = compute_water_report(&config, &crop, &series, 0.5).unwrap();
        assert_eq!(none.water_savings_from_panels_cubic_m, 0.0);
        let expected = half.total_water_requirement_cubic_m
            * 0.5
            * config.evaporation_reduction_factor;
        assert!((half.water_savings_from_panels_cubic_m - expected).abs() < 1e-9);
        assert!((half.water_savings_percent - 15.0).abs() < 1e-9);
    }

    #[test]
    fn delivered_volume_exceeds_crop_need_by_efficiency() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("lettuce").unwrap();
        let series = vec![day(32.0, 20.0, 0.0); 14];
        let report = compute_water_report(&config, &crop, &series, 0.0).unwrap();
        let need_cubic_m = report.daily_irrigation_needs_mm.iter().sum::<f64>()
            * config.field_size
            / 1000.0;
        let expected = need_cubic_m / config.irrigation_efficiency;
        assert!((report.total_irrigation_volume_cubic_m - expected).abs() < 1e-9);
        assert!(report.total_irrigation_volume_cubic_m > need_cubic_m);
    }

    #[test]
    fn totals_convert_mm_to_cubic_meters() {
        let mut config = PanelConfiguration::default();
        config.field_size = 2_000.0;
        let crop = CropProfile::builtin("lettuce").unwrap();
        let series = vec![day(25.0, 15.0, 10.0); 10];
        let report = compute_water_report(&config, &crop, &series, 0.0).unwrap();
        // 10 mm over 2000 m2 for 10 days is 200 m3.
        assert!((report.total_precipitation_cubic_m - 200.0).abs() < 1e-9);
    }
}
