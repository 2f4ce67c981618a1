//! ---
//! agv_section: "07-control-cli"
//! agv_subsection: "binary"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Control CLI for running and inspecting agrivoltaics simulations."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use agv_common::AppConfig;
use agv_engine::shadow::compute_shadow_report;
use agv_model::Location;
use agv_weather::resolve_series;

use crate::simulate::load_panel_config;

#[derive(Debug, Args)]
pub struct ShadowArgs {
    #[arg(long, default_value_t = 40.0)]
    pub lat: f64,
    #[arg(long, default_value_t = -75.0)]
    pub lon: f64,
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,
    #[arg(long, default_value_t = 365)]
    pub days: u32,
    #[arg(long)]
    pub panel_file: Option<std::path::PathBuf>,
}

pub async fn run(args: ShadowArgs, config: &AppConfig) -> Result<()> {
    let panel = load_panel_config(args.panel_file.as_deref())?;
    let weather = resolve_series(
        &config.weather,
        Location::new(args.lat, args.lon),
        args.start,
        args.days,
    )
    .await?;
    let report = compute_shadow_report(&panel, args.lat, &weather)?;

    println!("shadow patterns over {} days at {:.2}N", args.days, args.lat);
    println!(
        "  length:   avg {:.2} m, min {:.2} m, max {:.2} m",
        report.average_shadow_length_m,
        report.minimum_shadow_length_m,
        report.maximum_shadow_length_m
    );
    println!(
        "  coverage: avg {:.1}% of the field",
        report.average_shadow_coverage_percent
    );
    Ok(())
}
