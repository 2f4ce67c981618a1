//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-day shadow geometry plus its series summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowReport {
    pub average_shadow_length_m: f64,
    pub maximum_shadow_length_m: f64,
    pub minimum_shadow_length_m: f64,
    pub average_shadow_coverage_percent: f64,
    pub daily_shadow_lengths_m: Vec<f64>,
    pub daily_shadow_areas_sqm: Vec<f64>,
    /// Coverage fraction per day, [0, 1]. Feeds the crop and water models.
    pub daily_shadow_coverage: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyReport {
    pub total_annual_energy_kwh: f64,
    pub average_daily_energy_kwh: f64,
    pub peak_daily_production_kwh: f64,
    pub min_daily_production_kwh: f64,
    /// Calendar-month sums keyed 1-12, insertion ordered.
    pub monthly_production_kwh: IndexMap<u32, f64>,
    pub daily_production_kwh: Vec<f64>,
    pub capacity_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropReport {
    pub total_annual_yield_kg: f64,
    pub yield_per_harvest_kg: f64,
    pub average_yield_per_sqm_kg: f64,
    pub number_of_harvest_cycles: u32,
    pub harvest_cycle_yields_kg: Vec<f64>,
    pub crop_type: String,
    pub estimated_market_value: f64,
    /// Combined daily growth factor, [0.001, 1.0].
    pub daily_growth_factors: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterReport {
    pub total_water_requirement_cubic_m: f64,
    pub total_irrigation_volume_cubic_m: f64,
    pub total_precipitation_cubic_m: f64,
    pub water_savings_from_panels_cubic_m: f64,
    pub water_savings_percent: f64,
    pub daily_irrigation_needs_mm: Vec<f64>,
    pub daily_precipitation_mm: Vec<f64>,
    pub irrigation_efficiency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapexBreakdown {
    pub panels: f64,
    pub mounting: f64,
    pub inverter: f64,
    pub installation: f64,
    pub agricultural_equipment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpexBreakdown {
    pub maintenance: f64,
    pub insurance: f64,
    pub solar_labor: f64,
    pub seeds: f64,
    pub fertilizer: f64,
    pub pesticide: f64,
    pub water: f64,
    pub agricultural_labor: f64,
}

/// Annual financial aggregation. `payback_period_years` and `lcoe` carry
/// +inf sentinels rather than erroring on zero denominators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub total_capex: f64,
    pub total_opex_annual: f64,
    pub energy_revenue_annual: f64,
    pub crop_revenue_annual: f64,
    pub total_revenue_annual: f64,
    pub net_profit_annual: f64,
    pub payback_period_years: f64,
    pub roi_percent: f64,
    pub npv: f64,
    pub irr_approx: f64,
    pub lcoe: f64,
    pub capex_breakdown: CapexBreakdown,
    pub opex_breakdown: OpexBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentalReport {
    pub carbon_emissions_avoided_kg: f64,
    pub system_carbon_footprint_kg: f64,
    pub net_carbon_benefit_kg: f64,
    pub carbon_payback_years: f64,
    pub land_use_efficiency_ratio: f64,
    pub dual_purpose_land_area_sqm: f64,
    pub water_savings_cubic_m: f64,
    pub water_savings_percent: f64,
}

/// Complete output of one simulation run. Written all-or-nothing: a
/// failed run stores an error marker instead, never partial data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub timestamp: DateTime<Utc>,
    pub energy_production: EnergyReport,
    pub crop_yield: CropReport,
    pub shadow_patterns: ShadowReport,
    pub water_usage: WaterReport,
    pub financial_metrics: FinancialReport,
    pub environmental_metrics: EnvironmentalReport,
}
