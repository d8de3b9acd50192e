/// Gauge reading staleness detection.
///
/// PEGELONLINE gauges report every 15 minutes under normal conditions. A
/// chart that quietly ends hours ago looks the same as a calm river, so the
/// status summary flags stations whose newest reading is too old.
///
/// # Clock injection
/// All functions accept a `now: DateTime<Utc>` parameter rather than calling
/// `Utc::now()` internally. This makes staleness purely deterministic in
/// tests without mocking or time manipulation.

use chrono::{DateTime, Utc};

use crate::model::{Measurement, MeasurementSeries};

// ---------------------------------------------------------------------------
// Staleness check
// ---------------------------------------------------------------------------

/// Returns `true` if the reading is older than `max_age_minutes` relative
/// to `now`.
///
/// Staleness is defined as strictly greater than the threshold:
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
pub fn is_stale_at(reading: &Measurement, max_age_minutes: u64, now: DateTime<Utc>) -> bool {
    let age_minutes = (now - reading.timestamp.with_timezone(&Utc)).num_minutes();
    age_minutes > max_age_minutes as i64
}

/// Staleness of a whole series, judged by its newest reading.
///
/// An empty series counts as stale.
pub fn series_is_stale_at(series: &MeasurementSeries, max_age_minutes: u64, now: DateTime<Utc>) -> bool {
    series
        .latest()
        .map(|reading| is_stale_at(reading, max_age_minutes, now))
        .unwrap_or(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sensor;
    use chrono::TimeZone;

    fn reading_at(datetime: &str) -> Measurement {
        Measurement {
            timestamp: DateTime::parse_from_rfc3339(datetime).expect("test timestamp"),
            value: 512.0,
        }
    }

    /// A fixed "now" used across all tests: 2024-05-01 13:00:00 UTC.
    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    // --- Not stale ----------------------------------------------------------

    #[test]
    fn test_reading_5_minutes_old_is_not_stale() {
        let reading = reading_at("2024-05-01T12:55:00+00:00");
        assert!(!is_stale_at(&reading, 15, fixed_now()));
    }

    #[test]
    fn test_reading_exactly_at_threshold_is_not_stale() {
        let reading = reading_at("2024-05-01T12:45:00+00:00"); // 15 min ago
        assert!(
            !is_stale_at(&reading, 15, fixed_now()),
            "staleness is strictly greater than, not >="
        );
    }

    #[test]
    fn test_reading_with_cest_offset_parsed_correctly() {
        // PEGELONLINE reports local time; 15:00+02:00 == 13:00Z, 0 min old.
        let reading = reading_at("2024-05-01T15:00:00+02:00");
        assert!(!is_stale_at(&reading, 15, fixed_now()));
    }

    // --- Stale --------------------------------------------------------------

    #[test]
    fn test_reading_one_minute_past_threshold_is_stale() {
        let reading = reading_at("2024-05-01T12:44:00+00:00");
        assert!(is_stale_at(&reading, 15, fixed_now()));
    }

    #[test]
    fn test_same_reading_stale_under_tight_threshold_not_under_loose() {
        let reading = reading_at("2024-05-01T12:30:00+00:00");
        assert!(is_stale_at(&reading, 20, fixed_now()));
        assert!(!is_stale_at(&reading, 60, fixed_now()));
    }

    // --- Series -------------------------------------------------------------

    #[test]
    fn test_series_judged_by_latest_reading() {
        let series = MeasurementSeries {
            shortname: "PASSAU DONAU".to_string(),
            sensor: Sensor::WaterLevel,
            measurements: vec![
                reading_at("2024-05-01T08:00:00+00:00"),
                reading_at("2024-05-01T12:50:00+00:00"),
            ],
        };
        assert!(!series_is_stale_at(&series, 60, fixed_now()));
    }

    #[test]
    fn test_empty_series_is_stale() {
        let series = MeasurementSeries {
            shortname: "PASSAU DONAU".to_string(),
            sensor: Sensor::WaterLevel,
            measurements: Vec::new(),
        };
        assert!(series_is_stale_at(&series, 60, fixed_now()));
    }
}
