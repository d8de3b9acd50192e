//! Water-level dashboard for PEGELONLINE river gauges.
//!
//! Downloads the station catalog, picks the gauges of a destination area,
//! fetches their recent measurements and renders them as a Plotly map,
//! per-station grid, or combined chart.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
pub mod stations;
