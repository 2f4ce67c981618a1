//! ---
//! agv_section: "01-shared-runtime"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared configuration and logging bootstrap for AGV services."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
pub mod config;
pub mod logging;

pub use config::{AppConfig, LoggingConfig, ReportConfig, RunStoreConfig, WeatherConfig};
pub use logging::{init_tracing, LogFormat};
