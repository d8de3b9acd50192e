//! Per-station status summary: latest reading, warning level reached, and
//! staleness. Logged once per run next to the chart.

pub mod stalenesses;
pub mod thresholds;

use chrono::{DateTime, Utc};

use crate::logging::{self, DataSource};
use crate::model::{Measurement, MeasurementSeries, ThresholdLevel};

#[derive(Debug, Clone, PartialEq)]
pub struct StationStatus {
    pub shortname: String,
    pub latest: Option<Measurement>,
    pub level: Option<ThresholdLevel>,
    pub stale: bool,
}

/// Assess every series against the warning levels at time `now`.
pub fn assess_at(
    series: &[MeasurementSeries],
    levels: &[ThresholdLevel],
    stale_after_minutes: u64,
    now: DateTime<Utc>,
) -> Vec<StationStatus> {
    series
        .iter()
        .map(|s| {
            let latest = s.latest().cloned();
            let level = latest
                .as_ref()
                .and_then(|m| thresholds::classify_level(m.value, levels))
                .cloned();
            StationStatus {
                shortname: s.shortname.clone(),
                latest,
                level,
                stale: stalenesses::series_is_stale_at(s, stale_after_minutes, now),
            }
        })
        .collect()
}

pub fn log_status(statuses: &[StationStatus]) {
    for status in statuses {
        let site = Some(status.shortname.as_str());
        let Some(latest) = &status.latest else {
            logging::warn(DataSource::Pegelonline, site, "no current reading");
            continue;
        };

        let reading = format!("{:.0} cm at {}", latest.value, latest.timestamp.format("%Y-%m-%d %H:%M %:z"));
        match &status.level {
            Some(level) => logging::warn(
                DataSource::Pegelonline,
                site,
                &format!("{} reached ({})", level.label, reading),
            ),
            None => logging::info(
                DataSource::Pegelonline,
                site,
                &format!("below all warning levels ({})", reading),
            ),
        }

        if status.stale {
            logging::warn(DataSource::Pegelonline, site, "latest reading is stale");
        }
    }
}
