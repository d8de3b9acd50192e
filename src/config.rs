/// Dashboard configuration.
///
/// Everything that used to be a source constant lives here: which chart to
/// draw, the destination area, the time window, the API base URL, the
/// warning levels and the cache policy. Loaded from TOML; every field has a
/// default so an empty file (or no file at all) gives the Passau dashboard.

use std::path::Path;

use chrono::Duration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::alert::thresholds;
use crate::ingest::cache::MemoryStore;
use crate::ingest::pegelonline::DEFAULT_BASE_URL;
use crate::model::{DashboardError, ThresholdLevel, default_thresholds};

/// Centre of the geographic view: the Passau Danube gauge.
pub const DEFAULT_MAP_CENTER: [f64; 2] = [48.575208623171456, 13.478019136458602];

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which chart to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Every catalog station on a map, destination area highlighted.
    Geographic,
    /// One subplot per selected station.
    #[serde(alias = "per-station-grid")]
    #[value(alias = "per-station-grid")]
    Grid,
    /// All selected stations overlaid on one chart.
    Combined,
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached URLs; 0 disables the cache.
    pub max_entries: usize,
    /// Entry lifetime in seconds; absent means entries never expire.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl_secs: Some(600),
        }
    }
}

impl CacheSettings {
    pub fn build_store(&self) -> MemoryStore {
        let ttl = self.ttl_secs.map(|secs| Duration::seconds(secs as i64));
        MemoryStore::new(self.max_entries, ttl)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub mode: Mode,
    /// Substring matched (case-insensitively) against station long names.
    pub destination_area: String,
    pub time_range_days: u32,
    pub base_url: String,
    /// Fixed y-axis range for the water-level charts, in cm.
    pub y_range: [f64; 2],
    /// `[latitude, longitude]` the map opens on.
    pub map_center: [f64; 2],
    /// A station whose newest reading is older than this is flagged stale.
    pub stale_after_minutes: u64,
    /// Per-request timeout; the HTTP client default applies when unset.
    pub request_timeout_secs: Option<u64>,
    pub cache: CacheSettings,
    pub thresholds: Vec<ThresholdLevel>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Combined,
            destination_area: "passau".to_string(),
            time_range_days: 2,
            base_url: DEFAULT_BASE_URL.to_string(),
            y_range: [0.0, 1200.0],
            map_center: DEFAULT_MAP_CENTER,
            stale_after_minutes: 60,
            request_timeout_secs: None,
            cache: CacheSettings::default(),
            thresholds: default_thresholds(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse and validate a TOML document.
pub fn from_toml_str(text: &str) -> Result<DashboardConfig, DashboardError> {
    let config: DashboardConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<DashboardConfig, DashboardError> {
    let text = std::fs::read_to_string(path).map_err(|source| DashboardError::ConfigIo {
        path: path.display().to_string(),
        source,
    })?;
    from_toml_str(&text)
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.time_range_days == 0 {
            return Err(DashboardError::InvalidConfig(
                "time_range_days must be at least 1".to_string(),
            ));
        }
        if self.y_range[0] >= self.y_range[1] {
            return Err(DashboardError::InvalidConfig(format!(
                "y_range lower bound {} must be below upper bound {}",
                self.y_range[0], self.y_range[1]
            )));
        }
        if !thresholds::is_ascending(&self.thresholds) {
            return Err(DashboardError::InvalidConfig(
                "thresholds must be listed in strictly ascending order".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs.map(std::time::Duration::from_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::cache::CacheStore;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = from_toml_str("").expect("empty config should load");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.mode, Mode::Combined);
        assert_eq!(config.destination_area, "passau");
        assert_eq!(config.time_range_days, 2);
        assert_eq!(config.thresholds.len(), 4);
    }

    #[test]
    fn test_full_document() {
        let text = r#"
            mode = "grid"
            destination_area = "köln"
            time_range_days = 7
            base_url = "http://localhost:9000/api"
            y_range = [100.0, 900.0]
            stale_after_minutes = 30

            [cache]
            max_entries = 10

            [[thresholds]]
            value = 620.0
            label = "Hochwassermarke I"

            [[thresholds]]
            value = 830.0
            label = "Hochwassermarke II"
        "#;
        let config = from_toml_str(text).expect("config should load");
        assert_eq!(config.mode, Mode::Grid);
        assert_eq!(config.destination_area, "köln");
        assert_eq!(config.time_range_days, 7);
        assert_eq!(config.y_range, [100.0, 900.0]);
        assert_eq!(config.cache.max_entries, 10);
        // Unset nested fields keep their defaults.
        assert_eq!(config.cache.ttl_secs, Some(600));
        assert_eq!(config.thresholds[1].label, "Hochwassermarke II");
        assert_eq!(config.map_center, DEFAULT_MAP_CENTER);
    }

    #[test]
    fn test_mode_aliases() {
        let config = from_toml_str(r#"mode = "per-station-grid""#).unwrap();
        assert_eq!(config.mode, Mode::Grid);
        let config = from_toml_str(r#"mode = "geographic""#).unwrap();
        assert_eq!(config.mode, Mode::Geographic);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = from_toml_str(r#"mode = "heatmap""#).unwrap_err();
        assert!(matches!(err, DashboardError::ConfigParse(_)));
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let text = r#"
            [[thresholds]]
            value = 800.0
            label = "high"

            [[thresholds]]
            value = 700.0
            label = "low"
        "#;
        let err = from_toml_str(text).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_days_rejected() {
        assert!(from_toml_str("time_range_days = 0").is_err());
    }

    #[test]
    fn test_inverted_y_range_rejected() {
        assert!(from_toml_str("y_range = [1200.0, 0.0]").is_err());
    }

    #[test]
    fn test_missing_file_is_config_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, DashboardError::ConfigIo { .. }));
    }

    #[test]
    fn test_bundled_config_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("pegmon.toml");
        let config = load_config(&path).expect("pegmon.toml should load");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_cache_settings_build_store() {
        let store = CacheSettings {
            max_entries: 0,
            ttl_secs: None,
        }
        .build_store();
        assert!(store.is_empty());
    }
}
