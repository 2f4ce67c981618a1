//! ---
//! agv_section: "02-core-data-model"
//! agv_subsection: "module"
//! agv_type: "source"
//! agv_scope: "code"
//! agv_description: "Shared data model for agrivoltaics simulation and optimization."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Error kinds surfaced by the simulation core.
///
/// Division-by-zero style cases inside the models are NOT errors: capacity
/// factor, payback and LCOE produce their documented 0 / +inf sentinels.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown reference: {0}")]
    MissingReference(String),
    #[error("upstream weather source unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("computation failure: {0}")]
    ComputationFailure(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    #[error("yaml serialization error: {0}")]
    YamlSerializationFailed(#[from] serde_yaml::Error),
}

impl SimulationError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
