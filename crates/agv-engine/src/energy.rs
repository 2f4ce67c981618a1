//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "energy-model"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Daily PV energy production with temperature derating and cloud attenuation."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Energy production model.

use chrono::Datelike;
use indexmap::IndexMap;
use tracing::debug;

use agv_model::{EnergyReport, PanelConfiguration, Result, SimulationError, WeatherRecord};

/// Energy produced by the whole array on one day (kWh).
pub fn daily_energy(config: &PanelConfiguration, day: &WeatherRecord) -> f64 {
    let temperature_derate =
        1.0 + config.temp_coefficient * (day.temperature_high - config.reference_temp);
    let cloud_derate = 1.0 - day.cloud_cover * config.cloud_attenuation;
    let efficiency_factor = config.panel_efficiency * temperature_derate * cloud_derate;
    day.solar_radiation
        * config.panel_area
        * f64::from(config.num_panels())
        * efficiency_factor
}

/// Runs the energy model over a weather series.
pub fn compute_energy_report(
    config: &PanelConfiguration,
    series: &[WeatherRecord],
) -> Result<EnergyReport> {
    if series.is_empty() {
        return Err(SimulationError::invalid("empty weather series"));
    }
    config.validate()?;

    let mut daily = Vec::with_capacity(series.len());
    let mut monthly: IndexMap<u32, f64> = IndexMap::new();
    for day in series {
        let energy = daily_energy(config, day);
        *monthly.entry(day.date.month()).or_insert(0.0) += energy;
        daily.push(energy);
    }

    let total = daily.iter().sum::<f64>();
    let average = total / daily.len() as f64;
    let peak = daily.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let minimum = daily.iter().copied().fold(f64::INFINITY, f64::min);

    let nameplate =
        24.0 * config.panel_efficiency * config.panel_area * f64::from(config.num_panels());
    let capacity_factor = if nameplate > 0.0 { average / nameplate } else { 0.0 };
    debug!(total_kwh = total, capacity_factor, "energy model complete");

    Ok(EnergyReport {
        total_annual_energy_kwh: total,
        average_daily_energy_kwh: average,
        peak_daily_production_kwh: peak,
        min_daily_production_kwh: minimum,
        monthly_production_kwh: monthly,
        daily_production_kwh: daily,
        capacity_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agv_model::Location;
    use agv_weather::SyntheticWeather;
    use chrono::NaiveDate;

    fn clear_day(radiation: f64, temperature_high: f64, cloud_cover: f64) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            latitude: 40.0,
            longitude: -75.0,
            temperature_high,
            temperature_low: temperature_high - 10.0,
            humidity: 50.0,
            precipitation: 0.0,
            cloud_cover,
            wind_speed: 3.0,
            wind_direction: 180.0,
            solar_radiation: radiation,
        }
    }

    #[test]
    fn clear_sky_energy_is_strictly_positive() {
        let config = PanelConfiguration::default();
        for radiation in [0.5, 3.0, 7.5] {
            assert!(daily_energy(&config, &clear_day(radiation, 25.0, 0.0)) > 0.0);
        }
    }

    #[test]
    fn hot_days_derate_output() {
        let config = PanelConfiguration::default();
        let at_reference = daily_energy(&config, &clear_day(6.0, 25.0, 0.0));
        let hot = daily_energy(&config, &clear_day(6.0, 40.0, 0.0));
        assert!(hot < at_reference);
        let expected = at_reference * (1.0 + config.temp_coefficient * 15.0);
        assert!((hot - expected).abs() < 1e-9);
    }

    #[test]
    fn full_cloud_cover_attenuates_by_constant() {
        let config = PanelConfiguration::default();
        let clear = daily_energy(&config, &clear_day(6.0, 25.0, 0.0));
        let overcast = daily_energy(&config, &clear_day(6.0, 25.0, 1.0));
        assert!((overcast - clear * (1.0 - config.cloud_attenuation)).abs() < 1e-9);
    }

    #[test]
    fn capacity_factor_uses_nameplate_denominator() {
        let config = PanelConfiguration::default();
        let series = vec![clear_day(6.0, 25.0, 0.0); 10];
        let report = compute_energy_report(&config, &series).unwrap();
        let nameplate =
            24.0 * config.panel_efficiency * config.panel_area * f64::from(config.num_panels());
        assert!((report.capacity_factor - report.average_daily_energy_kwh / nameplate).abs() < 1e-12);
        assert!(report.capacity_factor > 0.0);
    }

    #[test]
    fn monthly_sums_add_up_to_total() {
        let config = PanelConfiguration::default();
        let series = SyntheticWeather::default()
            .generate(
                Location::default(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                365,
            )
            .unwrap();
        let report = compute_energy_report(&config, &series).unwrap();
        assert_eq!(report.monthly_production_kwh.len(), 12);
        let monthly_total: f64 = report.monthly_production_kwh.values().sum();
        assert!((monthly_total - report.total_annual_energy_kwh).abs() < 1e-6);
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = compute_energy_report(&PanelConfiguration::default(), &[]).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
    }
}
