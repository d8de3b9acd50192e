/// Data shaping for the water-level dashboard.
///
/// This module turns the selected stations into per-station measurement
/// series ready for charting. Threshold classification and staleness live
/// in `alert`; chart layout lives in `render`.
///
/// Submodules:
/// - `series` — builds one `MeasurementSeries` per selected station.

pub mod series;
