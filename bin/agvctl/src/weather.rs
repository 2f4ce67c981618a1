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
use clap::{Args, Subcommand};

use agv_common::AppConfig;
use agv_model::Location;
use agv_weather::{SyntheticWeather, WeatherService};

#[derive(Debug, Subcommand)]
pub enum WeatherCommand {
    #[command(about = "Generate a deterministic synthetic series and print a digest")]
    Synth(SynthArgs),
    #[command(about = "Resolve a series through cache and archive, warming the cache")]
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
pub struct SynthArgs {
    #[arg(long, default_value_t = 40.0)]
    pub lat: f64,
    #[arg(long, default_value_t = -75.0)]
    pub lon: f64,
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,
    #[arg(long, default_value_t = 30)]
    pub days: u32,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[arg(long, default_value_t = 40.0)]
    pub lat: f64,
    #[arg(long, default_value_t = -75.0)]
    pub lon: f64,
    #[arg(long, default_value = "2024-01-01")]
    pub start: NaiveDate,
    #[arg(long, default_value_t = 365)]
    pub days: u32,
}

fn print_digest(series: &[agv_model::WeatherRecord]) {
    let n = series.len() as f64;
    let avg_high = series.iter().map(|r| r.temperature_high).sum::<f64>() / n;
    let total_rain: f64 = series.iter().map(|r| r.precipitation).sum();
    let avg_radiation = series.iter().map(|r| r.solar_radiation).sum::<f64>() / n;
    println!("{} days from {}", series.len(), series[0].date);
    println!("  avg high: {avg_high:.1} C");
    println!("  rain:     {total_rain:.1} mm total");
    println!("  solar:    {avg_radiation:.2} kWh/m2/day average");
}

pub async fn run(cmd: WeatherCommand, config: &AppConfig) -> Result<()> {
    match cmd {
        WeatherCommand::Synth(args) => {
            let seed = args.seed.unwrap_or(config.weather.synthetic_seed);
            let series = SyntheticWeather::new(seed).generate(
                Location::new(args.lat, args.lon),
                args.start,
                args.days,
            )?;
            print_digest(&series);
        }
        WeatherCommand::Fetch(args) => {
            let service = WeatherService::from_config(&config.weather);
            let series = service
                .resolve(Location::new(args.lat, args.lon), args.start, args.days)
                .await?;
            print_digest(&series);
            println!("  cache:    {}", service.store().root().display());
        }
    }
    Ok(())
}
