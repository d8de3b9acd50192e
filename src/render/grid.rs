//! One subplot per selected station, stacked vertically.
//!
//! Row count follows the selection. Every row carries the station's series
//! plus one line per warning level, on a shared fixed y range.

use serde_json::{Map, Value, json};

use crate::analysis::series::combined_span;
use crate::model::{MeasurementSeries, ThresholdLevel};
use crate::render::{
    ChartOptions, Figure, Line, X_AXIS_TITLE, Y_AXIS_TITLE, chart_title, series_trace,
    threshold_trace,
};

pub const ROW_HEIGHT_PX: usize = 650;
pub const SERIES_COLOR: &str = "firebrick";
pub const SERIES_WIDTH: f64 = 4.0;

/// Axis suffix Plotly uses for a 1-based subplot row: "" for the first, "2", "3", ...
fn axis_suffix(row: usize) -> String {
    if row == 1 { String::new() } else { row.to_string() }
}

/// `(bottom, top)` of each row in paper coordinates, top row first.
///
/// Rows are separated by `0.3 / rows` of the plot height.
pub fn row_domains(rows: usize) -> Vec<(f64, f64)> {
    if rows == 0 {
        return Vec::new();
    }
    let spacing = 0.3 / rows as f64;
    let height = (1.0 - spacing * (rows - 1) as f64) / rows as f64;
    (0..rows)
        .map(|r| {
            let top = 1.0 - r as f64 * (height + spacing);
            ((top - height).max(0.0), top)
        })
        .collect()
}

pub fn grid_figure(
    series: &[MeasurementSeries],
    levels: &[ThresholdLevel],
    options: &ChartOptions,
) -> Figure {
    let rows = series.len();
    let span = combined_span(series).unwrap_or(options.fallback_span);
    let domains = row_domains(rows);

    let mut data = Vec::new();
    let mut layout = Map::new();
    let mut annotations = Vec::new();

    for (idx, (station, (bottom, top))) in series.iter().zip(&domains).enumerate() {
        let row = idx + 1;
        let suffix = axis_suffix(row);
        let xref = format!("x{}", suffix);
        let yref = format!("y{}", suffix);

        let mut trace = series_trace(station);
        trace.line = Some(Line {
            color: Some(SERIES_COLOR.to_string()),
            width: Some(SERIES_WIDTH),
        });
        trace.xaxis = Some(xref.clone());
        trace.yaxis = Some(yref.clone());
        data.push(trace);

        for level in levels {
            let mut line = threshold_trace(
                level,
                span,
                format!("{} - {}", level.label, station.shortname),
            );
            line.xaxis = Some(xref.clone());
            line.yaxis = Some(yref.clone());
            data.push(line);
        }

        layout.insert(
            format!("xaxis{}", suffix),
            json!({
                "title": {"text": X_AXIS_TITLE},
                "anchor": yref,
                "domain": [0.0, 1.0],
            }),
        );
        layout.insert(
            format!("yaxis{}", suffix),
            json!({
                "title": {"text": Y_AXIS_TITLE},
                "range": options.y_range,
                "anchor": xref,
                "domain": [bottom, top],
            }),
        );
        annotations.push(json!({
            "text": station.shortname,
            "x": 0.5,
            "y": top,
            "xref": "paper",
            "yref": "paper",
            "xanchor": "center",
            "yanchor": "bottom",
            "showarrow": false,
        }));
    }

    layout.insert("title".to_string(), json!({"text": chart_title(&options.area)}));
    if rows > 0 {
        layout.insert("height".to_string(), json!(ROW_HEIGHT_PX * rows));
    }
    layout.insert("annotations".to_string(), Value::Array(annotations));

    Figure {
        data,
        layout: Value::Object(layout),
    }
}
