//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
//! Core records exchanged between the weather provider, the simulation
//! engine, the optimizer and the orchestrator. Everything here is plain
//! serde data: floats are `f64`, dates serialise as ISO-8601.

pub mod crop;
pub mod error;
pub mod panel;
pub mod result;
pub mod run;
pub mod weather;

pub use crop::CropProfile;
pub use error::{Result, SimulationError};
pub use panel::{EconomicAssumptions, PanelConfiguration, TrackingType};
pub use result::{
    CapexBreakdown, CropReport, EnergyReport, EnvironmentalReport, FinancialReport,
    OpexBreakdown, ShadowReport, SimulationResult, WaterReport,
};
pub use run::{RunStatus, SimulationRun};
pub use weather::{validate_series, Location, WeatherRecord};
