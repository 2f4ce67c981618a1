//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "finance-model"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "CAPEX/OPEX, payback, NPV, LCOE and environmental aggregation."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Financial and environmental metrics.
//!
//! Pure arithmetic over annual summary figures, no daily iteration. Zero
//! denominators produce sentinels (+inf for payback and LCOE, 0 for ratio
//! metrics) rather than errors, so downstream consumers can rank and
//! display degenerate configurations.

use tracing::debug;

use agv_model::{
    CapexBreakdown, EnvironmentalReport, FinancialReport, OpexBreakdown, PanelConfiguration,
    Result, SimulationError, WaterReport,
};

/// Financial aggregation from annual energy (kWh) and crop yield (kg).
pub fn compute_financial_report(
    config: &PanelConfiguration,
    annual_energy_kwh: f64,
    annual_yield_kg: f64,
) -> Result<FinancialReport> {
    config.validate()?;
    if !annual_energy_kwh.is_finite() || !annual_yield_kg.is_finite() {
        return Err(SimulationError::ComputationFailure(
            "non-finite annual figures fed to financial model".into(),
        ));
    }
    let economics = &config.economics;
    let num_panels = f64::from(config.num_panels());

    let capex_breakdown = CapexBreakdown {
        panels: economics.panel_cost * num_panels,
        mounting: economics.mounting_cost * num_panels,
        inverter: economics.inverter_cost,
        installation: economics.installation_cost,
        agricultural_equipment: economics.ag_equipment_cost,
    };
    let total_capex = capex_breakdown.panels
        + capex_breakdown.mounting
        + capex_breakdown.inverter
        + capex_breakdown.installation
        + capex_breakdown.agricultural_equipment;

    let opex_breakdown = OpexBreakdown {
        maintenance: economics.maintenance_cost_annual,
        insurance: economics.insurance_cost_annual,
        solar_labor: economics.solar_labor_cost_annual,
        seeds: economics.seeds_cost_annual,
        fertilizer: economics.fertilizer_cost_annual,
        pesticide: economics.pesticide_cost_annual,
        water: economics.water_cost_annual,
        agricultural_labor: economics.ag_labor_cost_annual,
    };
    let total_opex = opex_breakdown.maintenance
        + opex_breakdown.insurance
        + opex_breakdown.solar_labor
        + opex_breakdown.seeds
        + opex_breakdown.fertilizer
        + opex_breakdown.pesticide
        + opex_breakdown.water
        + opex_breakdown.agricultural_labor;

    let energy_revenue = annual_energy_kwh * economics.energy_price;
    let crop_revenue = annual_yield_kg * economics.crop_price;
    let total_revenue = energy_revenue + crop_revenue;
    let net_profit = total_revenue - total_opex;

    let payback = if net_profit > 0.0 {
        total_capex / net_profit
    } else {
        f64::INFINITY
    };

    let lifetime = economics.project_lifetime_years;
    let npv = -total_capex
        + (1..=lifetime)
            .map(|t| net_profit / (1.0 + economics.discount_rate).powi(t as i32))
            .sum::<f64>();

    let lifetime_energy = annual_energy_kwh * f64::from(lifetime);
    let lcoe = if lifetime_energy > 0.0 {
        (total_capex + total_opex * f64::from(lifetime)) / lifetime_energy
    } else {
        f64::INFINITY
    };

    let roi_percent = if total_capex > 0.0 {
        net_profit / total_capex * 100.0
    } else {
        0.0
    };
    let irr_approx = if total_capex > 0.0 { net_profit / total_capex } else { 0.0 };
    debug!(total_capex, net_profit, payback_years = payback, "financial model complete");

    Ok(FinancialReport {
        total_capex,
        total_opex_annual: total_opex,
        energy_revenue_annual: energy_revenue,
        crop_revenue_annual: crop_revenue,
        total_revenue_annual: total_revenue,
        net_profit_annual: net_profit,
        payback_period_years: payback,
        roi_percent,
        npv,
        irr_approx,
        lcoe,
        capex_breakdown,
        opex_breakdown,
    })
}

/// Environmental aggregation from annual energy and the water report.
pub fn compute_environmental_report(
    config: &PanelConfiguration,
    annual_energy_kwh: f64,
    water: &WaterReport,
) -> Result<EnvironmentalReport> {
    config.validate()?;
    let economics = &config.economics;
    let num_panels = f64::from(config.num_panels());

    let lifetime_energy = annual_energy_kwh * f64::from(economics.project_lifetime_years);
    let carbon_avoided = lifetime_energy * economics.grid_carbon_intensity;
    let footprint = economics.panel_carbon_footprint * num_panels;
    let annual_offset = annual_energy_kwh * economics.grid_carbon_intensity;
    let carbon_payback = if annual_offset > 0.0 {
        footprint / annual_offset
    } else {
        f64::INFINITY
    };

    // Land a conventional plant would need for the same energy, relative
    // to the field that here also grows the crop.
    let land_use_ratio =
        annual_energy_kwh * economics.conventional_solar_land_use / config.field_size;

    // Savings against a conventionally irrigated field, not the shading
    // credit already in the water report.
    let water_savings = economics.conventional_water_usage - water.total_irrigation_volume_cubic_m;
    let water_savings_percent = if economics.conventional_water_usage > 0.0 {
        water_savings / economics.conventional_water_usage * 100.0
    } else {
        0.0
    };

    Ok(EnvironmentalReport {
        carbon_emissions_avoided_kg: carbon_avoided,
        system_carbon_footprint_kg: footprint,
        net_carbon_benefit_kg: carbon_avoided - footprint,
        carbon_payback_years: carbon_payback,
        land_use_efficiency_ratio: land_use_ratio,
        dual_purpose_land_area_sqm: config.field_size,
        water_savings_cubic_m: water_savings,
        water_savings_percent,
    })
}
