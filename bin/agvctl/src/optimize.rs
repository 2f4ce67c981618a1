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
use agv_model::{CropProfile, Location, TrackingType};
use agv_optimizer::{optimize, Constraints, Goals, OptimizeOptions};
use agv_weather::resolve_series;

use crate::simulate::load_panel_config;

#[derive(Debug, Args)]
pub struct OptimizeArgs {
    #[arg(long, default_value = "lettuce")]
    pub crop: String,
    #[arg(long, default_value_t = 40.0)]
    pub lat: f64,
    #[arg(long, default_value_t = -75.0)]
    pub lon: f64,
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,
    #[arg(long, default_value_t = 365)]
    pub days: u32,
    #[arg(long, default_value_t = 1000)]
    pub candidates: usize,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value_t = 0.5)]
    pub energy_weight: f64,
    #[arg(long, default_value_t = 0.5)]
    pub crop_weight: f64,
    /// Allow the search to pick tracking mounts as well as fixed racks.
    #[arg(long)]
    pub with_tracking: bool,
    /// JSON file with the base PanelConfiguration for unsampled parameters.
    #[arg(long)]
    pub panel_file: Option<std::path::PathBuf>,
}

pub async fn run(args: OptimizeArgs, config: &AppConfig) -> Result<()> {
    let base = load_panel_config(args.panel_file.as_deref())?;
    let crop = CropProfile::builtin(&args.crop)?;
    let weather = resolve_series(
        &config.weather,
        Location::new(args.lat, args.lon),
        args.start,
        args.days,
    )
    .await?;

    let constraints = Constraints {
        tracking_options: if args.with_tracking {
            vec![
                TrackingType::Fixed,
                TrackingType::SingleAxis,
                TrackingType::DualAxis,
            ]
        } else {
            Vec::new()
        },
        ..Constraints::default()
    };
    let goals = Goals {
        energy_weight: args.energy_weight,
        crop_weight: args.crop_weight,
        ..Goals::default()
    };
    let options = OptimizeOptions {
        candidates: args.candidates,
        seed: args.seed,
    };

    let outcome = optimize(&base, &crop, &weather, &constraints, &goals, &options)?;
    println!(
        "best of {} candidates (score {:.4})",
        outcome.candidates_evaluated, outcome.score
    );
    println!(
        "  energy {:.0} kWh/year, yield {:.0} kg/year",
        outcome.annual_energy_kwh, outcome.annual_yield_kg
    );
    let pretty = serde_json::to_string_pretty(&outcome.configuration)
        .context("serializing winning configuration")?;
    println!("{pretty}");
    Ok(())
}
