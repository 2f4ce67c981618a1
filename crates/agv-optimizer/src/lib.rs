//! ---
//! agv_section: "05-configuration-optimizer"
//! agv_subsection: "crate-root"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Seeded random search over bounded panel-configuration space."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Configuration optimizer.
//!
//! Evaluate-and-rank search, no gradients: sample N candidates uniformly
//! within per-parameter bounds, score each with the energy and crop models
//! over the supplied weather series, return the argmax. Tie-break is the
//! first candidate reaching the maximum, and the whole search is
//! deterministic for a fixed seed.
//!
//! Scoring uses the unperturbed per-cycle yield so that a candidate's
//! score is a pure function of configuration, weather and goals.

pub mod search;

pub use search::{
    optimize, sample_candidates, score_candidate, Bound, Constraints, Goals,
    OptimizationOutcome, OptimizeOptions,
};
