/// PEGELONLINE REST API v2 client helpers
///
/// URL construction and payload decoding for the two endpoints the
/// dashboard uses: the station catalog and per-station measurements.
///
/// API Documentation: https://www.pegelonline.wsv.de/webservice/dokuRestapi

use serde_json::Value;

use crate::model::{FetchError, Measurement, Sensor, Station};

pub const DEFAULT_BASE_URL: &str = "https://www.pegelonline.wsv.de/webservices/rest-api/v2";

// ============================================================================
// URL Construction
// ============================================================================

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// `{base}/stations.json`
pub fn stations_url(base_url: &str) -> String {
    format!("{}/stations.json", trim_base(base_url))
}

/// `{base}/stations/{shortname}/{W|DFH}/measurements.json?start=P{days}D`
///
/// The sensor segment is derived from the shortname, see `Sensor::for_shortname`.
pub fn measurement_url(base_url: &str, shortname: &str, days: u32) -> String {
    let sensor = Sensor::for_shortname(shortname);
    format!(
        "{}/stations/{}/{}/measurements.json?start=P{}D",
        trim_base(base_url),
        shortname,
        sensor.path_segment(),
        days
    )
}

// ============================================================================
// Payload Decoding
// ============================================================================

/// Decode the `stations.json` array.
pub fn parse_catalog(json: &Value) -> Result<Vec<Station>, FetchError> {
    serde_json::from_value(json.clone()).map_err(|e| FetchError::ParseError(e.to_string()))
}

/// Decode a `measurements.json` array, oldest reading first.
pub fn parse_measurements(json: &Value) -> Result<Vec<Measurement>, FetchError> {
    let mut readings: Vec<Measurement> = serde_json::from_value(json.clone())
        .map_err(|e| FetchError::ParseError(e.to_string()))?;
    readings.sort_by_key(|m| m.timestamp);
    Ok(readings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stations_url() {
        assert_eq!(
            stations_url(DEFAULT_BASE_URL),
            "https://www.pegelonline.wsv.de/webservices/rest-api/v2/stations.json"
        );
        assert_eq!(stations_url("http://localhost:8080/"), "http://localhost:8080/stations.json");
    }

    #[test]
    fn test_measurement_url_uses_w_sensor() {
        assert_eq!(
            measurement_url(DEFAULT_BASE_URL, "PASSAU DONAU", 2),
            "https://www.pegelonline.wsv.de/webservices/rest-api/v2/stations/PASSAU DONAU/W/measurements.json?start=P2D"
        );
    }

    #[test]
    fn test_measurement_url_uses_dfh_sensor() {
        assert_eq!(
            measurement_url("http://h", "PASSAU DFH", 7),
            "http://h/stations/PASSAU DFH/DFH/measurements.json?start=P7D"
        );
    }

    #[test]
    fn test_parse_catalog_keeps_order() {
        let json = json!([
            {"shortname": "A", "longname": "ALPHA"},
            {"shortname": "B", "longname": "BRAVO", "latitude": 48.0, "longitude": 13.0}
        ]);
        let stations = parse_catalog(&json).expect("catalog should parse");
        let names: Vec<_> = stations.iter().map(|s| s.shortname.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(parse_catalog(&json!({"error": "nope"})).is_err());
    }

    #[test]
    fn test_parse_measurements_sorts_by_timestamp() {
        let json = json!([
            {"timestamp": "2024-05-01T10:15:00+02:00", "value": 515.0},
            {"timestamp": "2024-05-01T10:00:00+02:00", "value": 512.0}
        ]);
        let readings = parse_measurements(&json).expect("measurements should parse");
        assert_eq!(readings[0].value, 512.0);
        assert_eq!(readings[1].value, 515.0);
    }

    #[test]
    fn test_parse_measurements_rejects_bad_timestamp() {
        let json = json!([{"timestamp": "yesterday", "value": 1.0}]);
        let err = parse_measurements(&json).unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
    }
}
