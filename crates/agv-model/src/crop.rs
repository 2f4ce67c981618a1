//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Physiological reference data for one crop, looked up by name.
/// Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    pub growth_period_days: u32,
    /// Lower bound of the stress-free temperature band (deg C).
    pub optimal_temperature_min: f64,
    /// Upper bound of the stress-free temperature band (deg C).
    pub optimal_temperature_max: f64,
    pub water_requirement_mm_day: f64,
    /// Fraction of incident shade tolerated without growth penalty, [0, 1].
    pub shade_tolerance: f64,
    pub typical_yield_per_sqm: f64,
    /// kg per plant and harvest cycle.
    pub typical_yield_per_plant: f64,
    pub planting_depth_cm: f64,
    pub row_spacing_cm: f64,
    pub plant_spacing_cm: f64,
}

impl CropProfile {
    pub fn validate(&self) -> Result<()> {
        if self.optimal_temperature_min >= self.optimal_temperature_max {
            return Err(SimulationError::invalid(format!(
                "crop {}: optimal temperature minimum must be below maximum",
                self.name
            )));
        }
        if self.growth_period_days == 0 {
            return Err(SimulationError::invalid(format!(
                "crop {}: growth period must be positive",
                self.name
            )));
        }
        if self.water_requirement_mm_day < 0.0 {
            return Err(SimulationError::invalid(format!(
                "crop {}: water requirement cannot be negative",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.shade_tolerance) {
            return Err(SimulationError::invalid(format!(
                "crop {}: shade tolerance outside [0, 1]",
                self.name
            )));
        }
        Ok(())
    }

    /// Look up one of the built-in reference profiles.
    pub fn builtin(name: &str) -> Result<CropProfile> {
        builtin_profiles()
            .into_iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SimulationError::MissingReference(format!("crop '{name}'")))
    }

    pub fn builtin_names() -> Vec<String> {
        builtin_profiles()
            .into_iter()
            .map(|profile| profile.name)
            .collect()
    }
}

fn builtin_profiles() -> Vec<CropProfile> {
    vec![
        CropProfile {
            name: "lettuce".into(),
            scientific_name: Some("Lactuca sativa".into()),
            growth_period_days: 60,
            optimal_temperature_min: 15.0,
            optimal_temperature_max: 25.0,
            water_requirement_mm_day: 4.5,
            shade_tolerance: 0.7,
            typical_yield_per_sqm: 6.25,
            typical_yield_per_plant: 0.25,
            planting_depth_cm: 0.5,
            row_spacing_cm: 30.0,
            plant_spacing_cm: 20.0,
        },
        CropProfile {
            name: "spinach".into(),
            scientific_name: Some("Spinacia oleracea".into()),
            growth_period_days: 45,
            optimal_temperature_min: 10.0,
            optimal_temperature_max: 22.0,
            water_requirement_mm_day: 3.5,
            shade_tolerance: 0.75,
            typical_yield_per_sqm: 4.5,
            typical_yield_per_plant: 0.15,
            planting_depth_cm: 1.5,
            row_spacing_cm: 25.0,
            plant_spacing_cm: 10.0,
        },
        CropProfile {
            name: "kale".into(),
            scientific_name: Some("Brassica oleracea".into()),
            growth_period_days: 70,
            optimal_temperature_min: 12.0,
            optimal_temperature_max: 24.0,
            water_requirement_mm_day: 4.0,
            shade_tolerance: 0.8,
            typical_yield_per_sqm: 5.0,
            typical_yield_per_plant: 0.4,
            planting_depth_cm: 1.0,
            row_spacing_cm: 45.0,
            plant_spacing_cm: 30.0,
        },
        CropProfile {
            name: "strawberry".into(),
            scientific_name: Some("Fragaria ananassa".into()),
            growth_period_days: 90,
            optimal_temperature_min: 15.0,
            optimal_temperature_max: 26.0,
            water_requirement_mm_day: 5.0,
            shade_tolerance: 0.5,
            typical_yield_per_sqm: 3.0,
            typical_yield_per_plant: 0.3,
            planting_depth_cm: 1.0,
            row_spacing_cm: 90.0,
            plant_spacing_cm: 35.0,
        },
    ]
}
