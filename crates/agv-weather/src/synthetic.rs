//! ---
//! agv_section: "03-weather-provider"
//! agv_subsection: "synthetic-generator"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Deterministic seasonal weather generator used as the offline fallback."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Seeded synthetic weather generation.
//!
//! Produces a plausible mid-latitude seasonal profile: warm cloudy-ish
//! summers, cold winters, spring and autumn precipitation peaks. The
//! generator is fully deterministic for a given seed and start date, so
//! repeated simulations over synthetic weather are reproducible.

use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma};

use agv_model::{Location, Result, SimulationError, WeatherRecord};

/// Default seed when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic weather generator.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticWeather {
    seed: u64,
}

impl Default for SyntheticWeather {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl SyntheticWeather {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a contiguous daily series starting at `start`.
    ///
    /// Each call re-seeds the internal RNG, so calling twice with the same
    /// arguments yields the same series.
    pub fn generate(
        &self,
        location: Location,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherRecord>> {
        if days == 0 {
            return Err(SimulationError::invalid("days must be greater than zero"));
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let rain_magnitude = Exp::new(1.0 / 5.0)
            .map_err(|e| SimulationError::ComputationFailure(format!("rain distribution: {e}")))?;
        let wind_gusts = Gamma::new(2.0, 2.0)
            .map_err(|e| SimulationError::ComputationFailure(format!("wind distribution: {e}")))?;

        let mut series = Vec::with_capacity(days as usize);
        for offset in 0..days {
            let date = start + Duration::days(i64::from(offset));
            series.push(synthesize_day(
                &mut rng,
                location,
                date,
                &rain_magnitude,
                &wind_gusts,
            ));
        }
        Ok(series)
    }
}

fn synthesize_day(
    rng: &mut StdRng,
    location: Location,
    date: NaiveDate,
    rain_magnitude: &Exp<f64>,
    wind_gusts: &Gamma<f64>,
) -> WeatherRecord {
    let day_of_year = f64::from(date.ordinal());

    // Annual temperature wave, phase-shifted so the minimum lands mid January.
    let seasonal = ((day_of_year - 15.0) / 365.0 * 360.0).to_radians().sin() * 0.5 + 0.5;
    let random_factor = rng.gen::<f64>() * 0.4 - 0.2;

    let temperature_high = 15.0 + seasonal * 25.0 + random_factor * 10.0;
    let temperature_low = 5.0 + seasonal * 15.0 + random_factor * 8.0;

    // Precipitation peaks twice a year (spring and autumn).
    let precip_seasonal = ((day_of_year - 80.0) / 365.0 * 720.0).to_radians().sin() * 0.5 + 0.5;
    let precip_chance = precip_seasonal * 0.5;
    let precipitation = if rng.gen::<f64>() < precip_chance {
        rain_magnitude.sample(rng)
    } else {
        0.0
    };

    let cloud_cover = (0.2 + precipitation / 20.0 + rng.gen::<f64>() * 0.3).clamp(0.0, 1.0);
    let solar_radiation =
        ((1.0 - cloud_cover) * 7.0 * seasonal + rng.gen::<f64>() * 1.5).max(0.1);

    let wind_speed = 2.0 + wind_gusts.sample(rng);
    let wind_direction = f64::from(rng.gen_range(0..360));

    let humidity =
        (40.0 + 30.0 * (1.0 - seasonal) + precipitation * 3.0 + rng.gen::<f64>() * 20.0)
            .clamp(10.0, 100.0);

    WeatherRecord {
        date,
        latitude: location.latitude,
        longitude: location.longitude,
        temperature_high,
        temperature_low,
        precipitation,
        humidity,
        cloud_cover,
        solar_radiation,
        wind_speed,
        wind_direction,
    }
}
