//! All selected stations overlaid on one chart.
//!
//! Warning levels are drawn first so station series sit on top of them.
//! Colors come from fixed palettes by position and wrap around when there
//! are more stations or levels than palette entries.

use serde_json::json;

use crate::analysis::series::combined_span;
use crate::model::{MeasurementSeries, ThresholdLevel};
use crate::render::{
    ChartOptions, Figure, Line, STATION_COLORS, WARNING_COLORS, X_AXIS_TITLE, Y_AXIS_TITLE,
    chart_title, palette_color, series_trace, threshold_trace,
};

pub fn combined_figure(
    series: &[MeasurementSeries],
    levels: &[ThresholdLevel],
    options: &ChartOptions,
) -> Figure {
    let span = combined_span(series).unwrap_or(options.fallback_span);
    let mut data = Vec::with_capacity(levels.len() + series.len());

    for (idx, level) in levels.iter().enumerate() {
        let mut trace = threshold_trace(level, span, format!("{} - {}", level.label, level.value));
        trace.line = Some(Line {
            color: Some(palette_color(&WARNING_COLORS, idx)),
            width: None,
        });
        data.push(trace);
    }

    for (idx, station) in series.iter().enumerate() {
        let mut trace = series_trace(station);
        trace.mode = Some("lines+markers".to_string());
        trace.line = Some(Line {
            color: Some(palette_color(&STATION_COLORS, idx)),
            width: None,
        });
        data.push(trace);
    }

    let layout = json!({
        "title": {"text": chart_title(&options.area)},
        "xaxis": {"title": {"text": X_AXIS_TITLE}},
        "yaxis": {"title": {"text": Y_AXIS_TITLE}, "range": options.y_range},
    });

    Figure { data, layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurement, Sensor, default_thresholds};
    use chrono::DateTime;

    fn series(shortname: &str, stamps: &[&str]) -> MeasurementSeries {
        MeasurementSeries {
            shortname: shortname.to_string(),
            sensor: Sensor::WaterLevel,
            measurements: stamps
                .iter()
                .map(|ts| Measurement {
                    timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
                    value: 600.0,
                })
                .collect(),
        }
    }

    fn options() -> ChartOptions {
        let start = DateTime::parse_from_rfc3339("2024-04-29T12:00:00+00:00").unwrap();
        let end = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap();
        ChartOptions {
            area: "passau".to_string(),
            y_range: [0.0, 1200.0],
            fallback_span: (start, end),
        }
    }

    fn line_color(trace: &crate::render::Trace) -> &str {
        trace.line.as_ref().and_then(|l| l.color.as_deref()).unwrap()
    }

    #[test]
    fn test_four_stations_take_palette_in_order() {
        let all: Vec<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| series(n, &["2024-05-01T10:00:00+02:00"]))
            .collect();
        let figure = combined_figure(&all, &default_thresholds(), &options());

        assert_eq!(figure.data.len(), 8);
        let station_traces = &figure.data[4..];
        for (trace, expected) in station_traces.iter().zip(STATION_COLORS) {
            assert_eq!(line_color(trace), expected);
            assert_eq!(trace.mode.as_deref(), Some("lines+markers"));
        }
        assert_eq!(station_traces[2].name.as_deref(), Some("Water level - C"));
    }

    #[test]
    fn test_more_than_four_stations_wrap_palette() {
        let all: Vec<_> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| series(n, &[]))
            .collect();
        let figure = combined_figure(&all, &default_thresholds(), &options());
        assert_eq!(figure.data.len(), 9);
        assert_eq!(line_color(&figure.data[8]), STATION_COLORS[0]);
    }

    #[test]
    fn test_threshold_lines_first_with_warning_palette() {
        let figure = combined_figure(&[], &default_thresholds(), &options());
        assert_eq!(figure.data.len(), 4);
        assert_eq!(figure.data[0].name.as_deref(), Some("Warning level 1 - 700"));
        assert_eq!(line_color(&figure.data[0]), WARNING_COLORS[0]);
        assert_eq!(line_color(&figure.data[3]), WARNING_COLORS[3]);
    }

    #[test]
    fn test_threshold_lines_span_all_series() {
        let all = vec![
            series("A", &["2024-05-01T10:00:00+02:00", "2024-05-01T11:00:00+02:00"]),
            series("B", &["2024-05-01T09:00:00+02:00", "2024-05-01T12:00:00+02:00"]),
        ];
        let figure = combined_figure(&all, &default_thresholds(), &options());
        assert_eq!(figure.data[0].x, ["2024-05-01 09:00:00", "2024-05-01 12:00:00"]);
    }

    #[test]
    fn test_threshold_lines_fall_back_to_window_without_data() {
        let figure = combined_figure(&[series("A", &[])], &default_thresholds(), &options());
        assert_eq!(figure.data[0].x, ["2024-04-29 12:00:00", "2024-05-01 12:00:00"]);
    }

    #[test]
    fn test_layout_axes() {
        let figure = combined_figure(&[], &default_thresholds(), &options());
        assert_eq!(figure.layout["yaxis"]["range"], json!([0.0, 1200.0]));
        assert_eq!(figure.layout["xaxis"]["title"]["text"], "Time");
        assert_eq!(figure.title(), Some("Passau's water levels:"));
    }
}
