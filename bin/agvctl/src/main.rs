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
use clap::{Parser, Subcommand};

use agv_common::{init_tracing, AppConfig};

mod optimize;
mod runs;
mod shadow;
mod simulate;
mod weather;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Agrivoltaics simulation control utility",
    long_about = None
)]
struct Cli {
    /// Path to a TOML configuration file (overrides AGV_CONFIG).
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run one full simulation and print the summary")]
    Simulate(simulate::SimulateArgs),
    #[command(about = "Search panel-configuration space for the best candidate")]
    Optimize(optimize::OptimizeArgs),
    #[command(about = "Compute standalone shadow patterns for a configuration")]
    Shadow(shadow::ShadowArgs),
    #[command(subcommand, about = "Inspect or refresh weather series")]
    Weather(weather::WeatherCommand),
    #[command(subcommand, about = "Inspect and manage stored runs")]
    Runs(runs::RunsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.config {
        std::env::set_var(AppConfig::ENV_CONFIG_PATH, path);
    }
    let config =
        AppConfig::load(&["agv.toml", "config/agv.toml"]).context("loading configuration")?;
    init_tracing("agvctl", &config.logging).context("initializing logging")?;

    match cli.command {
        Commands::Simulate(args) => simulate::run(args, &config).await,
        Commands::Optimize(args) => optimize::run(args, &config).await,
        Commands::Shadow(args) => shadow::run(args, &config).await,
        Commands::Weather(cmd) => weather::run(cmd, &config).await,
        Commands::Runs(cmd) => runs::run(cmd, &config).await,
    }
}
