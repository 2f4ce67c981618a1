//! ---
//! agv_section: "04-simulation-engine"
//! agv_subsection: "report-export"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Serializes simulation results to JSON and YAML report files."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Report export.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use agv_model::Result;

/// Writes result documents into a report directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    directory: PathBuf,
}

impl ReportExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn write_json<T: Serialize>(&self, name: &str, payload: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(format!("{name}.json"));
        let body = serde_json::to_vec_pretty(payload)?;
        fs::write(&path, body)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }

    pub fn write_yaml<T: Serialize>(&self, name: &str, payload: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(format!("{name}.yaml"));
        let body = serde_yaml::to_string(payload)?;
        fs::write(&path, body)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }
}
