/// Core data types for the PEGELONLINE water-level dashboard.
///
/// This module defines the shared domain model imported by all other modules:
/// catalog stations, measurement series, warning thresholds, and the error
/// types raised above the fetch layer. It contains no I/O.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Sensor codes
// ---------------------------------------------------------------------------

/// PEGELONLINE timeseries short name for the water level ("Wasserstand").
pub const SENSOR_WATER_LEVEL: &str = "W";

/// Timeseries short name used by the DFH gauges, which do not publish `W`.
pub const SENSOR_DFH: &str = "DFH";

/// Which timeseries a station's measurements are requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    WaterLevel,
    Dfh,
}

impl Sensor {
    /// Picks the sensor path from the station shortname: any shortname
    /// containing `DFH` reads the `DFH` series, everything else reads `W`.
    pub fn for_shortname(shortname: &str) -> Self {
        if shortname.contains(SENSOR_DFH) {
            Sensor::Dfh
        } else {
            Sensor::WaterLevel
        }
    }

    pub fn path_segment(&self) -> &'static str {
        match self {
            Sensor::WaterLevel => SENSOR_WATER_LEVEL,
            Sensor::Dfh => SENSOR_DFH,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// The water body a station sits on, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Water {
    pub shortname: String,
    pub longname: String,
}

/// One entry of `stations.json`.
///
/// Only `shortname` and `longname` are guaranteed; a handful of catalog
/// entries ship without coordinates, so those are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    pub shortname: String,
    pub longname: String,
    #[serde(default)]
    pub km: Option<f64>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub water: Option<Water>,
}

impl Station {
    /// `(latitude, longitude)` when the catalog provides both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Measurement types
// ---------------------------------------------------------------------------

/// A single reading from `measurements.json`. Values are centimetres on
/// the gauge's own datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<FixedOffset>, // e.g. "2024-05-01T12:00:00+02:00"
    pub value: f64,
}

/// All readings for one station over the trailing window, oldest first.
///
/// An empty `measurements` vector means the fetch failed or the payload
/// could not be decoded; the series is kept so the station still shows up
/// in the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    pub shortname: String,
    pub sensor: Sensor,
    pub measurements: Vec<Measurement>,
}

impl MeasurementSeries {
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn latest(&self) -> Option<&Measurement> {
        self.measurements.last()
    }

    /// First and last timestamp, in source order.
    pub fn span(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        match (self.measurements.first(), self.measurements.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold types
// ---------------------------------------------------------------------------

/// A fixed water level (cm) with its warning label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLevel {
    pub value: f64,
    pub label: String,
}

impl ThresholdLevel {
    pub fn new(value: f64, label: &str) -> Self {
        Self {
            value,
            label: label.to_string(),
        }
    }
}

/// Official warning levels ("Meldestufen") for the Danube at Passau,
/// in ascending order.
pub fn default_thresholds() -> Vec<ThresholdLevel> {
    vec![
        ThresholdLevel::new(700.0, "Warning level 1"),
        ThresholdLevel::new(740.0, "Warning level 2"),
        ThresholdLevel::new(770.0, "Warning level 3"),
        ThresholdLevel::new(850.0, "Warning level 4"),
    ]
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a single GET produced no JSON. Never escapes the fetcher; it is
/// logged and collapsed into an absent result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Non-200 HTTP response from the PEGELONLINE API.
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    TransportError(String),
    /// The response body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Errors from the parts of the dashboard that do not depend on upstream data.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("could not read config file {path}: {source}")]
    ConfigIo {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("could not write {path}: {source}")]
    RenderIo {
        path: String,
        source: std::io::Error,
    },
    #[error("could not serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("display server failed: {0}")]
    Server(#[from] std::io::Error),
}
