//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "crop-model"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Daily crop stress factors and multi-cycle yield aggregation."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Crop growth and yield model.
//!
//! Growth on a day is the product of three independent stress factors
//! (temperature, water, shade), each floored at 0.1 so a single bad input
//! never stalls growth to zero permanently. Cycle-to-cycle yield
//! variability draws from a caller-supplied RNG, keeping runs reproducible
//! under a fixed seed.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use agv_model::{CropProfile, CropReport, PanelConfiguration, Result, SimulationError, WeatherRecord};

const STRESS_FLOOR: f64 = 0.1;

/// Temperature stress in [0.1, 1.0]. Full growth inside the optimal band,
/// one tenth lost per degree of deviation from the nearer bound.
pub fn temperature_stress(avg_temp: f64, crop: &CropProfile) -> f64 {
    if (crop.optimal_temperature_min..=crop.optimal_temperature_max).contains(&avg_temp) {
        return 1.0;
    }
    let deviation = if avg_temp < crop.optimal_temperature_min {
        crop.optimal_temperature_min - avg_temp
    } else {
        avg_temp - crop.optimal_temperature_max
    };
    (1.0 - deviation / 10.0).clamp(STRESS_FLOOR, 1.0)
}

/// Water stress in [0.1, 1.0] from precipitation plus delivered irrigation.
pub fn water_stress(day: &WeatherRecord, config: &PanelConfiguration, crop: &CropProfile) -> f64 {
    let effective_water =
        day.precipitation + config.irrigation_amount * config.irrigation_efficiency;
    (effective_water / crop.water_requirement_mm_day)
        .min(1.0)
        .max(STRESS_FLOOR)
}

/// Shade stress in [0.1, 1.0] given the day's shadow coverage fraction.
pub fn shade_stress(coverage: f64, crop: &CropProfile) -> f64 {
    (1.0 - coverage * (1.0 - crop.shade_tolerance)).clamp(STRESS_FLOOR, 1.0)
}

/// Combined daily growth factors over the series.
///
/// `coverage` carries the per-day shadow coverage from the shadow model;
/// when absent the configured static percentage is used instead.
pub fn daily_growth_factors(
    config: &PanelConfiguration,
    crop: &CropProfile,
    series: &[WeatherRecord],
    coverage: Option<&[f64]>,
) -> Vec<f64> {
    let fallback = config.shadow_coverage_percent / 100.0;
    series
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let cover = coverage.and_then(|c| c.get(i)).copied().unwrap_or(fallback);
            temperature_stress(day.temperature_avg(), crop)
                * water_stress(day, config, crop)
                * shade_stress(cover, crop)
        })
        .collect()
}

/// Runs the crop model over a weather series and aggregates harvest cycles.
pub fn compute_crop_report(
    config: &PanelConfiguration,
    crop: &CropProfile,
    series: &[WeatherRecord],
    coverage: Option<&[f64]>,
    rng: &mut StdRng,
) -> Result<CropReport> {
    if series.is_empty() {
        return Err(SimulationError::invalid("empty weather series"));
    }
    config.validate()?;
    crop.validate()?;

    let factors = daily_growth_factors(config, crop, series, coverage);
    let window = (crop.growth_period_days as usize).min(factors.len());
    let average_factor = factors[..window].iter().sum::<f64>() / window as f64;

    let base_yield =
        crop.typical_yield_per_plant * config.planting_density * config.field_size;
    let cycle_yield = base_yield * average_factor;

    let cycles = 365 / crop.growth_period_days;
    let mut cycle_yields = Vec::with_capacity(cycles as usize);
    for _ in 0..cycles {
        // Cycle-to-cycle variability, uniform in [0.9, 1.1].
        let perturbation = 0.9 + 0.2 * rng.gen::<f64>();
        cycle_yields.push(cycle_yield * perturbation);
    }
    let total: f64 = cycle_yields.iter().sum();
    debug!(
        crop = %crop.name,
        cycles,
        total_yield_kg = total,
        "crop model complete"
    );

    Ok(CropReport {
        total_annual_yield_kg: total,
        yield_per_harvest_kg: cycle_yield,
        average_yield_per_sqm_kg: total / config.field_size,
        number_of_harvest_cycles: cycles,
        harvest_cycle_yields_kg: cycle_yields,
        crop_type: crop.name.clone(),
        estimated_market_value: total * config.economics.crop_price,
        daily_growth_factors: factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agv_model::Location;
    use agv_weather::SyntheticWeather;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn lettuce() -> CropProfile {
        CropProfile::builtin("lettuce").unwrap()
    }

    fn dry_day(temperature_avg: f64) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            latitude: 40.0,
            longitude: -75.0,
            temperature_high: temperature_avg + 5.0,
            temperature_low: temperature_avg - 5.0,
            humidity: 40.0,
            precipitation: 0.0,
            cloud_cover: 0.1,
            wind_speed: 3.0,
            wind_direction: 180.0,
            solar_radiation: 6.0,
        }
    }

    #[test]
    fn temperature_stress_is_one_inside_optimal_band() {
        let crop = lettuce();
        for t in [15.0, 18.5, 22.0, 25.0] {
            assert_eq!(temperature_stress(t, &crop), 1.0);
        }
    }

    #[test]
    fn temperature_stress_degrades_outside_band() {
        let crop = lettuce();
        assert!((temperature_stress(28.0, &crop) - 0.7).abs() < 1e-12);
        assert!((temperature_stress(12.0, &crop) - 0.7).abs() < 1e-12);
        // Extreme deviation bottoms out at the floor.
        assert_eq!(temperature_stress(50.0, &crop), 0.1);
    }

    #[test]
    fn no_water_at_all_floors_water_stress() {
        let crop = lettuce();
        let mut config = PanelConfiguration::default();
        config.irrigation_amount = 0.0;
        for _ in 0..60 {
            assert_eq!(water_stress(&dry_day(20.0), &config, &crop), 0.1);
        }
    }

    #[test]
    fn shade_tolerant_crops_lose_less() {
        let mut tolerant = lettuce();
        tolerant.shade_tolerance = 0.9;
        let mut sensitive = lettuce();
        sensitive.shade_tolerance = 0.1;
        assert!(shade_stress(0.5, &tolerant) > shade_stress(0.5, &sensitive));
        assert_eq!(shade_stress(0.0, &sensitive), 1.0);
    }

    #[test]
    fn growth_factor_stays_within_bounds() {
        let crop = lettuce();
        let config = PanelConfiguration::default();
        let series = SyntheticWeather::default()
            .generate(
                Location::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                365,
            )
            .unwrap();
        for factor in daily_growth_factors(&config, &crop, &series, None) {
            assert!((0.001..=1.0).contains(&factor));
        }
    }

    #[test]
    fn yield_is_reproducible_under_a_fixed_seed() {
        let crop = lettuce();
        let config = PanelConfiguration::default();
        let series = SyntheticWeather::default()
            .generate(
                Location::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                365,
            )
            .unwrap();
        let a = compute_crop_report(&config, &crop, &series, None, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = compute_crop_report(&config, &crop, &series, None, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a.total_annual_yield_kg, b.total_annual_yield_kg);
        assert_eq!(a.harvest_cycle_yields_kg, b.harvest_cycle_yields_kg);
    }

    #[test]
    fn cycle_count_divides_the_year() {
        let crop = lettuce();
        let config = PanelConfiguration::default();
        let series: Vec<_> = (0..365).map(|_| dry_day(20.0)).collect();
        let report = compute_crop_report(
            &config,
            &crop,
            &series,
            None,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert_eq!(report.number_of_harvest_cycles, 365 / crop.growth_period_days);
        assert_eq!(
            report.harvest_cycle_yields_kg.len(),
            report.number_of_harvest_cycles as usize
        );
        for cycle in &report.harvest_cycle_yields_kg {
            assert!(*cycle >= report.yield_per_harvest_kg * 0.9);
            assert!(*cycle <= report.yield_per_harvest_kg * 1.1);
        }
    }
}
