//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::panel::PanelConfiguration;
use crate::result::SimulationResult;
use crate::weather::Location;

/// Lifecycle of a simulation run.
///
/// pending -> running -> {completed, failed}. Terminal states only leave
/// via an explicit re-run request that resets the run to pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }

    pub fn can_transition(self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (RunStatus::Pending, RunStatus::Running)
                | (RunStatus::Running, RunStatus::Completed)
                | (RunStatus::Running, RunStatus::Failed)
                | (RunStatus::Completed, RunStatus::Pending)
                | (RunStatus::Failed, RunStatus::Pending)
        )
    }
}

/// One evaluation of a configuration against a crop and weather series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    pub id: Uuid,
    pub status: RunStatus,
    pub config: PanelConfiguration,
    pub crop_name: String,
    pub location: Location,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    /// Seed for cycle-yield perturbation and synthetic weather.
    pub seed: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: Option<SimulationResult>,
    /// Populated instead of `result` when the run failed.
    #[serde(default)]
    pub error: Option<String>,
}

impl SimulationRun {
    pub fn new(
        config: PanelConfiguration,
        crop_name: impl Into<String>,
        location: Location,
        start_date: NaiveDate,
        duration_days: u32,
        seed: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: RunStatus::Pending,
            config,
            crop_name: crop_name.into(),
            location,
            start_date,
            duration_days,
            seed,
            created_at: Utc::now(),
            completed_at: None,
            result: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        assert!(RunStatus::Pending.can_transition(RunStatus::Running));
        assert!(RunStatus::Running.can_transition(RunStatus::Completed));
        assert!(RunStatus::Running.can_transition(RunStatus::Failed));
    }

    #[test]
    fn terminal_states_only_reset_to_pending() {
        assert!(RunStatus::Completed.can_transition(RunStatus::Pending));
        assert!(RunStatus::Failed.can_transition(RunStatus::Pending));
        assert!(!RunStatus::Completed.can_transition(RunStatus::Running));
        assert!(!RunStatus::Failed.can_transition(RunStatus::Completed));
    }

    #[test]
    fn pending_cannot_skip_running() {
        assert!(!RunStatus::Pending.can_transition(RunStatus::Completed));
        assert!(!RunStatus::Pending.can_transition(RunStatus::Failed));
    }

    #[test]
    fn new_run_starts_pending_and_empty() {
        let run = SimulationRun::new(
            PanelConfiguration::default(),
            "lettuce",
            Location::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            365,
            42,
        );
        assert_eq!(run.status, RunStatus::Pending);
        assert!(run.result.is_none());
        assert!(run.completed_at.is_none());
    }
}
