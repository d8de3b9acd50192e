//! Catalog map.
//!
//! Plots the whole catalog, not just the selection, so the destination-area
//! filter can be checked visually: members are colored `1`, everything
//! else `2`.

use serde_json::json;

use crate::model::Station;
use crate::render::{Figure, Marker, MarkerColor, Trace, TraceKind};
use crate::stations::area_membership;

pub const MARKER_SIZE: f64 = 10.0;
pub const MAP_ZOOM: f64 = 5.0;
pub const MAP_PITCH: f64 = 10.0;

const IN_AREA: u8 = 1;
const OUTSIDE_AREA: u8 = 2;

/// Map of every catalog station that has coordinates.
pub fn geographic_figure(catalog: &[Station], area: &str, center: [f64; 2]) -> Figure {
    let mut trace = Trace::new(TraceKind::Scattermapbox);
    trace.mode = Some("markers".to_string());

    let membership = area_membership(catalog, area);
    let mut flags = Vec::new();
    for (station, in_area) in catalog.iter().zip(membership) {
        let Some((lat, lon)) = station.coordinates() else {
            continue;
        };
        trace.lat.push(lat);
        trace.lon.push(lon);
        trace.text.push(station.longname.clone());
        flags.push(if in_area { IN_AREA } else { OUTSIDE_AREA });
    }

    trace.marker = Some(Marker {
        size: Some(MARKER_SIZE),
        color: Some(MarkerColor::PerPoint(flags)),
    });

    let layout = json!({
        "title": format!(
            "All available water stations, separated by color for {}",
            area.to_uppercase()
        ),
        "hovermode": "closest",
        "mapbox": {
            "bearing": 0,
            "style": "open-street-map",
            "center": {"lat": center[0], "lon": center[1]},
            "pitch": MAP_PITCH,
            "zoom": MAP_ZOOM,
        },
    });

    Figure {
        data: vec![trace],
        layout,
    }
}
