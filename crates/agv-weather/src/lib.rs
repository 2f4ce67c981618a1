//! ---
//! agv_section: "03-weather-provider"
//! agv_subsection: "crate-root"
//! agv_type: "source"
//! agv_scope: "library"
//! agv_description: "Weather series providers: cache store, archive client, synthetic generator."
//! agv_version: "v0.1.0"
//! agv_owner: "tbd"
//! ---

//! Weather series acquisition for agrivoltaic simulations.
//!
//! Every simulation consumes a contiguous daily [`agv_model::WeatherRecord`]
//! series. This crate resolves one from three sources in order of preference:
//! the local file cache, the Open-Meteo historical archive, and finally a
//! deterministic synthetic generator that never fails.

pub mod archive;
pub mod provider;
pub mod store;
pub mod synthetic;

pub use archive::OpenMeteoArchive;
pub use provider::{resolve_series, WeatherProvider, WeatherService};
pub use store::WeatherStore;
pub use synthetic::SyntheticWeather;
