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

fn default_panel_height() -> f64 {
    2.5
}

fn default_panel_width() -> f64 {
    1.0
}

fn default_panel_angle() -> f64 {
    30.0
}

fn default_panel_azimuth() -> f64 {
    180.0
}

fn default_panel_spacing() -> f64 {
    5.0
}

fn default_panel_rows() -> u32 {
    10
}

fn default_panels_per_row() -> u32 {
    10
}

fn default_panel_area() -> f64 {
    1.7
}

fn default_panel_efficiency() -> f64 {
    0.2
}

fn default_irrigation_amount() -> f64 {
    5.0
}

fn default_irrigation_efficiency() -> f64 {
    0.85
}

fn default_field_size() -> f64 {
    10_000.0
}

fn default_crop_type() -> String {
    "lettuce".to_owned()
}

fn default_planting_density() -> f64 {
    25.0
}

fn default_crop_coefficient() -> f64 {
    1.0
}

fn default_evaporation_reduction() -> f64 {
    0.3
}

fn default_shadow_coverage_percent() -> f64 {
    30.0
}

fn default_temp_coefficient() -> f64 {
    -0.004
}

fn default_reference_temp() -> f64 {
    25.0
}

fn default_cloud_attenuation() -> f64 {
    0.7
}

/// Panel mounting behaviour.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingType {
    #[default]
    Fixed,
    SingleAxis,
    DualAxis,
}

/// One candidate or selected array layout plus the agricultural knobs
/// that the per-day models consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfiguration {
    #[serde(default = "default_panel_height")]
    pub panel_height: f64,
    #[serde(default = "default_panel_width")]
    pub panel_width: f64,
    /// Tilt from horizontal, degrees in [0, 90].
    #[serde(default = "default_panel_angle")]
    pub panel_angle: f64,
    #[serde(default = "default_panel_azimuth")]
    pub panel_azimuth: f64,
    /// Row gap (m).
    #[serde(default = "default_panel_spacing")]
    pub panel_spacing: f64,
    #[serde(default = "default_panel_rows")]
    pub panel_rows: u32,
    #[serde(default = "default_panels_per_row")]
    pub panels_per_row: u32,
    /// Single module surface (m2).
    #[serde(default = "default_panel_area")]
    pub panel_area: f64,
    #[serde(default = "default_panel_efficiency")]
    pub panel_efficiency: f64,
    #[serde(default)]
    pub tracking_type: TrackingType,
    /// Applied irrigation (mm/day).
    #[serde(default = "default_irrigation_amount")]
    pub irrigation_amount: f64,
    #[serde(default = "default_irrigation_efficiency")]
    pub irrigation_efficiency: f64,
    /// Cultivated field area (m2).
    #[serde(default = "default_field_size")]
    pub field_size: f64,
    #[serde(default = "default_crop_type")]
    pub crop_type: String,
    /// Plants per m2.
    #[serde(default = "default_planting_density")]
    pub planting_density: f64,
    #[serde(default = "default_crop_coefficient")]
    pub crop_coefficient: f64,
    #[serde(default = "default_evaporation_reduction")]
    pub evaporation_reduction_factor: f64,
    /// Fallback shade coverage when no geometry-derived series is supplied.
    #[serde(default = "default_shadow_coverage_percent")]
    pub shadow_coverage_percent: f64,
    /// Silicon derating per deg C above reference.
    #[serde(default = "default_temp_coefficient")]
    pub temp_coefficient: f64,
    #[serde(default = "default_reference_temp")]
    pub reference_temp: f64,
    #[serde(default = "default_cloud_attenuation")]
    pub cloud_attenuation: f64,
    #[serde(default)]
    pub economics: EconomicAssumptions,
}

impl Default for PanelConfiguration {
    fn default() -> Self {
        Self {
            panel_height: default_panel_height(),
            panel_width: default_panel_width(),
            panel_angle: default_panel_angle(),
            panel_azimuth: default_panel_azimuth(),
            panel_spacing: default_panel_spacing(),
            panel_rows: default_panel_rows(),
            panels_per_row: default_panels_per_row(),
            panel_area: default_panel_area(),
            panel_efficiency: default_panel_efficiency(),
            tracking_type: TrackingType::default(),
            irrigation_amount: default_irrigation_amount(),
            irrigation_efficiency: default_irrigation_efficiency(),
            field_size: default_field_size(),
            crop_type: default_crop_type(),
            planting_density: default_planting_density(),
            crop_coefficient: default_crop_coefficient(),
            evaporation_reduction_factor: default_evaporation_reduction(),
            shadow_coverage_percent: default_shadow_coverage_percent(),
            temp_coefficient: default_temp_coefficient(),
            reference_temp: default_reference_temp(),
            cloud_attenuation: default_cloud_attenuation(),
            economics: EconomicAssumptions::default(),
        }
    }
}

impl PanelConfiguration {
    pub fn num_panels(&self) -> u32 {
        self.panel_rows * self.panels_per_row
    }

    /// Reject out-of-range parameters before any model runs. Floors and
    /// ceilings inside the models (shadow length, stress factors) are
    /// domain policy, not validation.
    pub fn validate(&self) -> Result<()> {
        if self.panel_height <= 0.0
            || self.panel_width <= 0.0
            || self.panel_spacing <= 0.0
            || self.panel_area <= 0.0
        {
            return Err(SimulationError::invalid(
                "panel geometry values must be positive",
            ));
        }
        if !(0.0..=90.0).contains(&self.panel_angle) {
            return Err(SimulationError::invalid(format!(
                "panel angle {} outside [0, 90]",
                self.panel_angle
            )));
        }
        if self.panel_rows == 0 || self.panels_per_row == 0 {
            return Err(SimulationError::invalid(
                "panel layout requires at least one row and one panel per row",
            ));
        }
        if !(self.panel_efficiency > 0.0 && self.panel_efficiency <= 1.0) {
            return Err(SimulationError::invalid(format!(
                "panel efficiency {} outside (0, 1]",
                self.panel_efficiency
            )));
        }
        if self.field_size <= 0.0 {
            return Err(SimulationError::invalid("field size must be positive"));
        }
        if self.irrigation_amount < 0.0 {
            return Err(SimulationError::invalid(
                "irrigation amount cannot be negative",
            ));
        }
        if !(self.irrigation_efficiency > 0.0 && self.irrigation_efficiency <= 1.0) {
            return Err(SimulationError::invalid(format!(
                "irrigation efficiency {} outside (0, 1]",
                self.irrigation_efficiency
            )));
        }
        if self.planting_density <= 0.0 {
            return Err(SimulationError::invalid(
                "planting density must be positive",
            ));
        }
        Ok(())
    }
}

/// Cost and price assumptions feeding the financial/environmental
/// aggregation. Defaults mirror a mid-size US installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicAssumptions {
    /// USD per panel.
    pub panel_cost: f64,
    /// USD per panel.
    pub mounting_cost: f64,
    pub inverter_cost: f64,
    pub installation_cost: f64,
    pub ag_equipment_cost: f64,
    pub maintenance_cost_annual: f64,
    pub insurance_cost_annual: f64,
    pub solar_labor_cost_annual: f64,
    pub seeds_cost_annual: f64,
    pub fertilizer_cost_annual: f64,
    pub pesticide_cost_annual: f64,
    pub water_cost_annual: f64,
    pub ag_labor_cost_annual: f64,
    /// USD per kWh sold.
    pub energy_price: f64,
    /// USD per kg sold.
    pub crop_price: f64,
    pub project_lifetime_years: u32,
    pub discount_rate: f64,
    /// kg CO2 per kWh displaced from the grid.
    pub grid_carbon_intensity: f64,
    /// Embodied kg CO2 per panel.
    pub panel_carbon_footprint: f64,
    /// m2 per annual kWh for a ground-mount-only plant.
    pub conventional_solar_land_use: f64,
    /// m3/year for a conventionally irrigated field of the same crop.
    pub conventional_water_usage: f64,
}

impl Default for EconomicAssumptions {
    fn default() -> Self {
        Self {
            panel_cost: 250.0,
            mounting_cost: 150.0,
            inverter_cost: 10_000.0,
            installation_cost: 15_000.0,
            ag_equipment_cost: 5_000.0,
            maintenance_cost_annual: 1_000.0,
            insurance_cost_annual: 500.0,
            solar_labor_cost_annual: 2_000.0,
            seeds_cost_annual: 1_000.0,
            fertilizer_cost_annual: 500.0,
            pesticide_cost_annual: 300.0,
            water_cost_annual: 800.0,
            ag_labor_cost_annual: 3_000.0,
            energy_price: 0.12,
            crop_price: 2.5,
            project_lifetime_years: 25,
            discount_rate: 0.05,
            grid_carbon_intensity: 0.5,
            panel_carbon_footprint: 50.0,
            conventional_solar_land_use: 0.02,
            conventional_water_usage: 700.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(PanelConfiguration::default().validate().is_ok());
    }

    #[test]
    fn angle_above_ninety_is_rejected() {
        let mut config = PanelConfiguration::default();
        config.panel_angle = 95.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_field_size_is_rejected() {
        let mut config = PanelConfiguration::default();
        config.field_size = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn tracking_type_uses_kebab_case_wire_names() {
        let json = serde_json::to_string(&TrackingType::SingleAxis).unwrap();
        assert_eq!(json, "\"single-axis\"");
        let parsed: TrackingType = serde_json::from_str("\"dual-axis\"").unwrap();
        assert_eq!(parsed, TrackingType::DualAxis);
    }

    #[test]
    fn num_panels_is_rows_times_columns() {
        let config = PanelConfiguration::default();
        assert_eq!(config.num_panels(), 100);
    }
}
