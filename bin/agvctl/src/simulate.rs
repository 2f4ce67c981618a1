//! ---
//! agv_section: "07-control-cli"
//! agv_subsection: "binary"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Control CLI for running and inspecting agrivoltaics simulations."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use agv_common::AppConfig;
use agv_core::Orchestrator;
use agv_engine::ReportExporter;
use agv_model::{Location, PanelConfiguration, RunStatus};

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Crop to grow under the panels.
    #[arg(long, default_value = "lettuce")]
    pub crop: String,
    #[arg(long, default_value_t = 40.0)]
    pub lat: f64,
    #[arg(long, default_value_t = -75.0)]
    pub lon: f64,
    /// First day of the simulated window.
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,
    #[arg(long, default_value_t = 365)]
    pub days: u32,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// JSON file with a PanelConfiguration; defaults apply when omitted.
    #[arg(long)]
    pub panel_file: Option<std::path::PathBuf>,
    /// Write the full result as a JSON report under the report directory.
    #[arg(long)]
    pub export: bool,
}

pub fn load_panel_config(path: Option<&std::path::Path>) -> Result<PanelConfiguration> {
    match path {
        Some(path) => {
            let body = std::fs::read(path)
                .with_context(|| format!("reading panel configuration {}", path.display()))?;
            serde_json::from_slice(&body).context("parsing panel configuration")
        }
        None => Ok(PanelConfiguration::default()),
    }
}

pub async fn run(args: SimulateArgs, config: &AppConfig) -> Result<()> {
    let panel = load_panel_config(args.panel_file.as_deref())?;
    let orchestrator = Orchestrator::from_config(config);
    let run = orchestrator.submit(
        panel,
        &args.crop,
        Location::new(args.lat, args.lon),
        args.start,
        args.days,
        args.seed,
    )?;
    let finished = orchestrator.execute(run.id).await?;

    match finished.status {
        RunStatus::Completed => {
            let result = finished
                .result
                .as_ref()
                .context("completed run carries no result")?;
            println!("run {} completed", finished.id);
            println!(
                "  energy:  {:.1} kWh/year (capacity factor {:.3})",
                result.energy_production.total_annual_energy_kwh,
                result.energy_production.capacity_factor
            );
            println!(
                "  yield:   {:.1} kg/year over {} cycles of {}",
                result.crop_yield.total_annual_yield_kg,
                result.crop_yield.number_of_harvest_cycles,
                result.crop_yield.crop_type
            );
            println!(
                "  water:   {:.1} m3 irrigation, {:.1} m3 saved by shading",
                result.water_usage.total_irrigation_volume_cubic_m,
                result.water_usage.water_savings_from_panels_cubic_m
            );
            println!(
                "  finance: net {:.0}/year, payback {:.1} years, NPV {:.0}",
                result.financial_metrics.net_profit_annual,
                result.financial_metrics.payback_period_years,
                result.financial_metrics.npv
            );
            if args.export {
                let exporter = ReportExporter::new(&config.reports.directory);
                let path = exporter.write_json(&format!("run-{}", finished.id), result)?;
                println!("  report:  {}", path.display());
            }
        }
        _ => {
            println!(
                "run {} failed: {}",
                finished.id,
                finished.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    Ok(())
}
