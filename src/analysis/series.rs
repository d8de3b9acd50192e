//! Series builder.
//!
//! For every selected station: pick the sensor, build the measurement URL
//! for the trailing window, fetch it, and decode it. Output order matches
//! input order, one series per station, always.
//!
//! A station whose fetch fails or whose payload does not decode gets an
//! empty series. The chart for that station is then empty; nothing is
//! interpolated or invented.

use chrono::{DateTime, FixedOffset};

use crate::ingest::cache::CacheStore;
use crate::ingest::fetch::{Fetcher, Transport};
use crate::ingest::pegelonline::{measurement_url, parse_measurements};
use crate::logging::{self, DataSource};
use crate::model::{MeasurementSeries, Sensor, Station};

/// Fetch the trailing `days` of readings for each station, in order.
pub fn build_series<T: Transport, S: CacheStore>(
    fetcher: &mut Fetcher<T, S>,
    base_url: &str,
    stations: &[Station],
    days: u32,
) -> Vec<MeasurementSeries> {
    let series: Vec<MeasurementSeries> = stations
        .iter()
        .map(|station| fetch_station_series(fetcher, base_url, &station.shortname, days))
        .collect();

    let empty = series.iter().filter(|s| s.is_empty()).count();
    logging::log_series_summary(series.len(), series.len() - empty, empty);

    series
}

fn fetch_station_series<T: Transport, S: CacheStore>(
    fetcher: &mut Fetcher<T, S>,
    base_url: &str,
    shortname: &str,
    days: u32,
) -> MeasurementSeries {
    let sensor = Sensor::for_shortname(shortname);
    let url = measurement_url(base_url, shortname, days);

    let measurements = match fetcher.fetch(&url) {
        Some(json) => match parse_measurements(&json) {
            Ok(readings) => {
                logging::debug(
                    DataSource::Pegelonline,
                    Some(shortname),
                    &format!("{} readings from {}", readings.len(), sensor.path_segment()),
                );
                readings
            }
            Err(e) => {
                logging::log_fetch_failure(Some(shortname), "decode measurements", &e);
                Vec::new()
            }
        },
        None => {
            logging::warn(
                DataSource::Pegelonline,
                Some(shortname),
                "no measurements returned, charting an empty series",
            );
            Vec::new()
        }
    };

    MeasurementSeries {
        shortname: shortname.to_string(),
        sensor,
        measurements,
    }
}

/// Earliest and latest timestamp over all non-empty series.
pub fn combined_span(
    series: &[MeasurementSeries],
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    series
        .iter()
        .filter_map(|s| s.span())
        .reduce(|(start, end), (s, e)| (start.min(s), end.max(e)))
}
