//! ---
//! agv_section: "06-orchestration"
//! agv_subsection: "crate-root"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Run lifecycle orchestration over the simulation engine."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Run orchestration.
//!
//! Owns the run state machine (pending, running, completed, failed), the
//! file-backed run store, and the execution path that materializes a
//! weather series and drives the engine pipeline. Pipeline errors are
//! captured on the run record; they never escape execution.

pub mod orchestrator;
pub mod store;

pub use orchestrator::Orchestrator;
pub use store::RunStore;
