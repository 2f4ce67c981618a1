//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "crate-root"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Coupled daily simulation pipeline for agrivoltaic systems."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Agrivoltaics simulation engine.
//!
//! One call to [`simulate_system`] runs the coupled daily models over a
//! materialized weather series: shadow geometry feeds crop shading and
//! water savings, energy and yield totals feed the financial and
//! environmental aggregation. The pipeline is synchronous and
//! side-effect-free; all randomness flows from the caller's seed.

pub mod energy;
pub mod finance;
pub mod growth;
pub mod reports;
pub mod shadow;
pub mod water;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use agv_model::{
    validate_series, CropProfile, PanelConfiguration, Result, SimulationResult, WeatherRecord,
};

pub use reports::ReportExporter;

/// Runs the full model pipeline for one configuration over one series.
pub fn simulate_system(
    config: &PanelConfiguration,
    crop: &CropProfile,
    weather: &[WeatherRecord],
    seed: u64,
) -> Result<SimulationResult> {
    config.validate()?;
    crop.validate()?;
    validate_series(weather)?;
    let latitude = weather[0].latitude;
    info!(
        crop = %crop.name,
        days = weather.len(),
        latitude,
        seed,
        "simulation pipeline starting"
    );

    let shadow_patterns = shadow::compute_shadow_report(config, latitude, weather)?;
    let energy_production = energy::compute_energy_report(config, weather)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let crop_yield = growth::compute_crop_report(
        config,
        crop,
        weather,
        Some(&shadow_patterns.daily_shadow_coverage),
        &mut rng,
    )?;

    let average_coverage = shadow_patterns.average_shadow_coverage_percent / 100.0;
    let water_usage = water::compute_water_report(config, crop, weather, average_coverage)?;

    let financial_metrics = finance::compute_financial_report(
        config,
        energy_production.total_annual_energy_kwh,
        crop_yield.total_annual_yield_kg,
    )?;
    let environmental_metrics =
        finance::compute_environmental_report(config, energy_production.total_annual_energy_kwh, &water_usage)?;

    info!(
        energy_kwh = energy_production.total_annual_energy_kwh,
        yield_kg = crop_yield.total_annual_yield_kg,
        net_profit = financial_metrics.net_profit_annual,
        "simulation pipeline complete"
    );

    Ok(SimulationResult {
        timestamp: Utc::now(),
        energy_production,
        crop_yield,
        shadow_patterns,
        water_usage,
        financial_metrics,
        environmental_metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agv_model::Location;
    use agv_weather::SyntheticWeather;
    use chrono::NaiveDate;

    fn year_of_weather() -> Vec<WeatherRecord> {
        SyntheticWeather::default()
            .generate(
                Location::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                365,
            )
            .unwrap()
    }

    #[test]
    fn full_pipeline_produces_consistent_result() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("lettuce").unwrap();
        let result = simulate_system(&config, &crop, &year_of_weather(), 42).unwrap();

        assert!(result.energy_production.total_annual_energy_kwh > 0.0);
        assert!(result.crop_yield.total_annual_yield_kg > 0.0);
        assert_eq!(result.shadow_patterns.daily_shadow_coverage.len(), 365);
        assert_eq!(result.crop_yield.crop_type, "lettuce");
        for factor in &result.crop_yield.daily_growth_factors {
            assert!((0.001..=1.0).contains(factor));
        }
    }

    #[test]
    fn same_seed_reproduces_the_result() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("spinach").unwrap();
        let weather = year_of_weather();
        let a = simulate_system(&config, &crop, &weather, 7).unwrap();
        let b = simulate_system(&config, &crop, &weather, 7).unwrap();
        assert_eq!(
            a.crop_yield.harvest_cycle_yields_kg,
            b.crop_yield.harvest_cycle_yields_kg
        );
        assert_eq!(
            a.energy_production.total_annual_energy_kwh,
            b.energy_production.total_annual_energy_kwh
        );
    }

    #[test]
    fn invalid_configuration_fails_before_any_model_runs() {
        let mut config = PanelConfiguration::default();
        config.panel_angle = 120.0;
        let crop = CropProfile::builtin("lettuce").unwrap();
        let err = simulate_system(&config, &crop, &year_of_weather(), 42).unwrap_err();
        assert!(matches!(err, agv_model::SimulationError::InvalidInput(_)));
    }

    #[test]
    fn empty_weather_is_rejected() {
        let config = PanelConfiguration::default();
        let crop = CropProfile::builtin("lettuce").unwrap();
        assert!(simulate_system(&config, &crop, &[], 42).is_err());
    }
}
