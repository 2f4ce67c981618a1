//! ---
//! agv_section: "06-orchestration"
//! agv_subsection: "run-store"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "File-backed run persistence with atomic writes."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Run persistence.
//!
//! One JSON document per run at `<directory>/<uuid>.json`. Writes land in
//! a temp file first and rename into place, so readers never observe a
//! partially written run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;
use walkdir::WalkDir;

use agv_model::{Result, RunStatus, SimulationError, SimulationRun};

#[derive(Debug, Clone)]
pub struct RunStore {
    directory: PathBuf,
}

impl RunStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{id}.json"))
    }

    pub fn save(&self, run: &SimulationRun) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.path(run.id);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(run)?;
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;
        debug!(id = %run.id, status = ?run.status, "run persisted");
        Ok(())
    }

    pub fn load(&self, id: Uuid) -> Result<SimulationRun> {
        let path = self.path(id);
        if !path.is_file() {
            return Err(SimulationError::MissingReference(format!(
                "run {id} not found"
            )));
        }
        let body = fs::read(&path)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// All stored runs, oldest first.
    pub fn list(&self) -> Result<Vec<SimulationRun>> {
        if !self.directory.is_dir() {
            return Ok(Vec::new());
        }
        let mut runs = Vec::new();
        for entry in WalkDir::new(&self.directory).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                SimulationError::ComputationFailure(format!("run store walk: {e}"))
            })?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let body = fs::read(path)?;
            runs.push(serde_json::from_slice::<SimulationRun>(&body)?);
        }
        runs.sort_by_key(|r| r.created_at);
        Ok(runs)
    }

    /// Deletes a terminal or pending run. Running runs are protected.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let run = self.load(id)?;
        if run.status == RunStatus::Running {
            return Err(SimulationError::invalid(format!(
                "run {id} is running and cannot be deleted"
            )));
        }
        fs::remove_file(self.path(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agv_model::{Location, PanelConfiguration};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn run() -> SimulationRun {
        SimulationRun::new(
            PanelConfiguration::default(),
            "lettuce",
            Location::default(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            365,
            42,
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        let original = run();
        store.save(&original).unwrap();
        let loaded = store.load(original.id).unwrap();
        assert_eq!(loaded.id, original.id);
        assert_eq!(loaded.status, RunStatus::Pending);
        assert_eq!(loaded.crop_name, "lettuce");
    }

    #[test]
    fn missing_run_is_a_missing_reference() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        let err = store.load(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, SimulationError::MissingReference(_)));
    }

    #[test]
    fn list_returns_runs_oldest_first() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        let first = run();
        let mut second = run();
        second.created_at = first.created_at + chrono::Duration::seconds(5);
        store.save(&second).unwrap();
        store.save(&first).unwrap();
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
    }

    #[test]
    fn running_runs_cannot_be_deleted() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        let mut active = run();
        active.status = RunStatus::Running;
        store.save(&active).unwrap();
        assert!(store.delete(active.id).is_err());

        active.status = RunStatus::Completed;
        store.save(&active).unwrap();
        store.delete(active.id).unwrap();
        assert!(store.load(active.id).is_err());
    }

    #[test]
    fn no_temp_files_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let store = RunStore::new(dir.path());
        store.save(&run()).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
