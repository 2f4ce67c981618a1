//! ---
//! agv_section: "01-shared-runtime"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared configuration and logging bootstrap for AGV services."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_cache_directory() -> PathBuf {
    PathBuf::from("target/cache/weather")
}

fn default_weather_seed() -> u64 {
    42
}

fn default_archive_enabled() -> bool {
    true
}

fn default_runs_directory() -> PathBuf {
    PathBuf::from("target/runs")
}

fn default_reports_directory() -> PathBuf {
    PathBuf::from("reports")
}

/// Top-level configuration for the AGV tooling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub runs: RunStoreConfig,
    #[serde(default)]
    pub reports: ReportConfig,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "AGV_CONFIG";

    /// Load configuration from disk, respecting the `AGV_CONFIG` override.
    /// Falls back to defaults when no candidate exists.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                return Self::from_path(PathBuf::from(env_path));
            }
        }
        for candidate in candidates {
            if candidate.as_ref().exists() {
                return Self::from_path(candidate.as_ref().to_path_buf());
            }
        }
        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    fn from_path(path: PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&raw)
            .map_err(|err| anyhow!("invalid config {}: {}", path.display(), err))?;
        debug!(source = %path.display(), "configuration loaded");
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_cache_directory")]
    pub cache_directory: PathBuf,
    /// When false the archive client is skipped and synthetic weather is
    /// generated directly.
    #[serde(default = "default_archive_enabled")]
    pub archive_enabled: bool,
    #[serde(default = "default_weather_seed")]
    pub synthetic_seed: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            cache_directory: default_cache_directory(),
            archive_enabled: default_archive_enabled(),
            synthetic_seed: default_weather_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStoreConfig {
    #[serde(default = "default_runs_directory")]
    pub directory: PathBuf,
}

impl Default for RunStoreConfig {
    fn default() -> Self {
        Self {
            directory: default_runs_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_reports_directory")]
    pub directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: default_reports_directory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_candidate_exists() {
        let config = AppConfig::load(&["does-not-exist.toml"]).unwrap();
        assert_eq!(config.weather.synthetic_seed, 42);
        assert!(config.weather.archive_enabled);
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agv.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[weather]\nsynthetic_seed = 7\narchive_enabled = false").unwrap();
        let config = AppConfig::load(&[&path]).unwrap();
        assert_eq!(config.weather.synthetic_seed, 7);
        assert!(!config.weather.archive_enabled);
        assert_eq!(config.runs.directory, PathBuf::from("target/runs"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agv.toml");
        fs::write(&path, "weather = 3").unwrap();
        assert!(AppConfig::load(&[&path]).is_err());
    }
}
