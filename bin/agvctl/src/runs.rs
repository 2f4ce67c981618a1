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
use clap::{Args, Subcommand};
use uuid::Uuid;

use agv_common::AppConfig;
use agv_core::Orchestrator;

#[derive(Debug, Subcommand)]
pub enum RunsCommand {
    #[command(about = "List stored runs")]
    List,
    #[command(about = "Print one run as JSON")]
    Show(RunIdArgs),
    #[command(about = "Reset a terminal run to pending and execute it again")]
    Rerun(RunIdArgs),
}

#[derive(Debug, Args)]
pub struct RunIdArgs {
    #[arg(long)]
    pub id: Uuid,
}

pub async fn run(cmd: RunsCommand, config: &AppConfig) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config);
    match cmd {
        RunsCommand::List => {
            let runs = orchestrator.store().list()?;
            if runs.is_empty() {
                println!("no runs stored");
                return Ok(());
            }
            for run in runs {
                println!(
                    "{}  {:<9}  {}  {} days of {}",
                    run.id,
                    format!("{:?}", run.status).to_lowercase(),
                    run.created_at.format("%Y-%m-%d %H:%M"),
                    run.duration_days,
                    run.crop_name
                );
            }
        }
        RunsCommand::Show(args) => {
            let run = orchestrator.store().load(args.id)?;
            let pretty = serde_json::to_string_pretty(&run).context("serializing run")?;
            println!("{pretty}");
        }
        RunsCommand::Rerun(args) => {
            orchestrator.rerun(args.id)?;
            let finished = orchestrator.execute(args.id).await?;
            println!("run {} finished as {:?}", finished.id, finished.status);
        }
    }
    Ok(())
}
