//! ---
//! agv_section: "06-orchestration"
//! agv_subsection: "orchestrator"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Drives runs through the state machine and the engine pipeline."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Run execution.
//!
//! `execute` takes a pending run to running, materializes the weather
//! series, runs the engine pipeline and lands the run in a terminal
//! state. Model errors are recorded on the run as a failure marker; the
//! only errors `execute` itself returns are store I/O and state-machine
//! violations.

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use agv_common::config::AppConfig;
use agv_engine::simulate_system;
use agv_model::{
    CropProfile, Location, PanelConfiguration, Result, RunStatus, SimulationError, SimulationRun,
};
use agv_weather::WeatherService;
use chrono::NaiveDate;

use crate::store::RunStore;

pub struct Orchestrator {
    store: RunStore,
    weather: WeatherService,
}

impl Orchestrator {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: RunStore::new(&config.runs.directory),
            weather: WeatherService::from_config(&config.weather),
        }
    }

    pub fn new(store: RunStore, weather: WeatherService) -> Self {
        Self { store, weather }
    }

    pub fn store(&self) -> &RunStore {
        &self.store
    }

    /// Validates inputs and persists a new pending run.
    pub fn submit(
        &self,
        config: PanelConfiguration,
        crop_name: &str,
        location: Location,
        start_date: NaiveDate,
        duration_days: u32,
        seed: u64,
    ) -> Result<SimulationRun> {
        config.validate()?;
        CropProfile::builtin(crop_name)?;
        if duration_days == 0 {
            return Err(SimulationError::invalid(
                "duration must be at least one day",
            ));
        }
        let run = SimulationRun::new(config, crop_name, location, start_date, duration_days, seed);
        self.store.save(&run)?;
        info!(id = %run.id, crop = crop_name, "run submitted");
        Ok(run)
    }

    /// Executes a pending run to completion or failure.
    pub async fn execute(&self, id: Uuid) -> Result<SimulationRun> {
        let mut run = self.store.load(id)?;
        if !run.status.can_transition(RunStatus::Running) {
            return Err(SimulationError::invalid(format!(
                "run {id} is {:?} and cannot start",
                run.status
            )));
        }
        run.status = RunStatus::Running;
        self.store.save(&run)?;
        info!(id = %run.id, "run started");

        match self.evaluate(&run).await {
            Ok(result) => {
                run.status = RunStatus::Completed;
                run.result = Some(result);
                run.error = None;
                run.completed_at = Some(Utc::now());
                info!(id = %run.id, "run completed");
            }
            Err(err) => {
                run.status = RunStatus::Failed;
                run.result = None;
                run.error = Some(err.to_string());
                run.completed_at = Some(Utc::now());
                error!(id = %run.id, error = %err, "run failed");
            }
        }
        self.store.save(&run)?;
        Ok(run)
    }

    async fn evaluate(&self, run: &SimulationRun) -> Result<agv_model::SimulationResult> {
        let crop = CropProfile::builtin(&run.crop_name)?;
        let weather = self
            .weather
            .resolve(run.location, run.start_date, run.duration_days)
            .await?;
        simulate_system(&run.config, &crop, &weather, run.seed)
    }

    /// Resets a terminal run to pending, clearing prior output.
    pub fn rerun(&self, id: Uuid) -> Result<SimulationRun> {
        let mut run = self.store.load(id)?;
        if !run.status.can_transition(RunStatus::Pending) {
            return Err(SimulationError::invalid(format!(
                "run {id} is {:?} and cannot be reset",
                run.status
            )));
        }
        run.status = RunStatus::Pending;
        run.result = None;
        run.error = None;
        run.completed_at = None;
        self.store.save(&run)?;
        info!(id = %run.id, "run reset to pending");
        Ok(run)
    }
}
