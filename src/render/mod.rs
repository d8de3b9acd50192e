//! Plotly figure model and chart builders.
//!
//! Builders produce an in-memory `Figure` serialized in Plotly's JSON shape
//! (`{"data": [...], "layout": {...}}`). Where the figure ends up is decided
//! separately by a `RenderTarget` (see `output`).
//!
//! Submodules:
//! - `geo` — catalog map.
//! - `grid` — one subplot per station.
//! - `combined` — all stations on one chart.
//! - `output` — HTML page, file export and the local display server.

pub mod combined;
pub mod geo;
pub mod grid;
pub mod output;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;

use crate::model::{MeasurementSeries, ThresholdLevel};

pub use output::{RenderTarget, deliver};

/// Colors for station series, by selection position.
pub const STATION_COLORS: [&str; 4] = ["#fc0356", "#ffb0ca", "#804659", "#57001c"];

/// Colors for threshold lines, by threshold position.
pub const WARNING_COLORS: [&str; 4] = ["#00db75", "#4fe09c", "#91bda8", "#9da3a0"];

pub const Y_AXIS_TITLE: &str = "Water measurement";
pub const X_AXIS_TITLE: &str = "Time";

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Marker color: one color for the trace or a value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Single(String),
    PerPoint(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Scattermapbox,
}

/// One Plotly trace. Empty vectors and unset options are left out of the
/// JSON so Plotly applies its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lat: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lon: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    pub fn new(kind: TraceKind) -> Self {
        Self {
            kind,
            name: None,
            mode: None,
            x: Vec::new(),
            y: Vec::new(),
            lat: Vec::new(),
            lon: Vec::new(),
            text: Vec::new(),
            line: None,
            marker: None,
            xaxis: None,
            yaxis: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Value,
}

impl Figure {
    pub fn title(&self) -> Option<&str> {
        self.layout
            .get("title")
            .and_then(|t| t.get("text").or(Some(t)))
            .and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Shared chart pieces
// ---------------------------------------------------------------------------

/// Layout inputs shared by the grid and combined charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Destination area as configured; used in the title.
    pub area: String,
    pub y_range: [f64; 2],
    /// Horizontal extent for threshold lines when no series has data.
    pub fallback_span: (DateTime<FixedOffset>, DateTime<FixedOffset>),
}

/// `passau` -> `Passau's water levels:`
pub fn chart_title(area: &str) -> String {
    let lower = area.to_lowercase();
    let mut chars = lower.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{}'s water levels:", capitalized)
}

/// Palette lookup that wraps around instead of running off the end.
pub fn palette_color(palette: &[&str], index: usize) -> String {
    palette[index % palette.len()].to_string()
}

/// Timestamps are written as gauge-local wall-clock time, which Plotly
/// reads without any timezone handling.
pub fn plotly_time(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Line trace for one station's readings.
pub fn series_trace(series: &MeasurementSeries) -> Trace {
    let mut trace = Trace::new(TraceKind::Scatter);
    trace.name = Some(format!("Water level - {}", series.shortname));
    trace.x = series.measurements.iter().map(|m| plotly_time(&m.timestamp)).collect();
    trace.y = series.measurements.iter().map(|m| m.value).collect();
    trace
}

/// Horizontal line at a threshold level across `span`.
pub fn threshold_trace(
    level: &ThresholdLevel,
    span: (DateTime<FixedOffset>, DateTime<FixedOffset>),
    name: String,
) -> Trace {
    let mut trace = Trace::new(TraceKind::Scatter);
    trace.name = Some(name);
    trace.mode = Some("lines".to_string());
    trace.x = vec![plotly_time(&span.0), plotly_time(&span.1)];
    trace.y = vec![level.value, level.value];
    trace
}
