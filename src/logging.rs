/// Structured logging for the water-level dashboard
///
/// Provides context-rich log lines tagged with the data source and, where
/// relevant, the station shortname. Output goes through the `log` facade;
/// `init_logger` installs `pretty_env_logger` as the backend so `RUST_LOG`
/// keeps working.

use std::fmt;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_log_level(self) -> log::Level {
        match self {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }

    fn as_filter(self) -> log::LevelFilter {
        self.as_log_level().to_level_filter()
    }
}

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Pegelonline,
    Cache,
    Render,
    Config,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Pegelonline => write!(f, "PEGEL"),
            DataSource::Cache => write!(f, "CACHE"),
            DataSource::Render => write!(f, "RENDER"),
            DataSource::Config => write!(f, "CONFIG"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the API rejected the request (4xx), e.g. a station
    /// that does not publish the requested series
    Expected,
    /// Unexpected failure - indicates service degradation or an API change
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl FailureType {
    /// Level a failure of this kind is logged at.
    pub fn log_level(&self) -> LogLevel {
        match self {
            FailureType::Unexpected => LogLevel::Error,
            FailureType::Expected | FailureType::Unknown => LogLevel::Warning,
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Install the `pretty_env_logger` backend.
///
/// `RUST_LOG` directives are applied when set; `min_level` fills in the
/// global level when it is not. A `Debug` minimum always overrides the
/// global level so `--verbose` works alongside module filters. Calling this
/// twice is harmless (the second install is ignored).
pub fn init_logger(min_level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let mut builder = pretty_env_logger::formatted_timed_builder();
    if let Some(filters) = &rust_log {
        builder.parse_filters(filters);
    }
    if let Some(level) = global_level(rust_log.is_some(), min_level) {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

/// Global level to set on top of any `RUST_LOG` directives, if any.
fn global_level(rust_log_set: bool, min_level: LogLevel) -> Option<log::LevelFilter> {
    if !rust_log_set || min_level == LogLevel::Debug {
        Some(min_level.as_filter())
    } else {
        None
    }
}

fn format_entry(source: &DataSource, site_id: Option<&str>, message: &str) -> String {
    let site_part = site_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
    format!("{}{}: {}", source, site_part, message)
}

fn emit(level: LogLevel, source: DataSource, site_id: Option<&str>, message: &str) {
    log::log!(level.as_log_level(), "{}", format_entry(&source, site_id, message));
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Log a general informational message
pub fn info(source: DataSource, site_id: Option<&str>, message: &str) {
    emit(LogLevel::Info, source, site_id, message);
}

/// Log a warning message
pub fn warn(source: DataSource, site_id: Option<&str>, message: &str) {
    emit(LogLevel::Warning, source, site_id, message);
}

/// Log an error message
pub fn error(source: DataSource, site_id: Option<&str>, message: &str) {
    emit(LogLevel::Error, source, site_id, message);
}

/// Log a debug message
pub fn debug(source: DataSource, site_id: Option<&str>, message: &str) {
    emit(LogLevel::Debug, source, site_id, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a PEGELONLINE fetch failure.
///
/// A 4xx (typically a 404 on a measurement URL) means the station has no
/// such timeseries, which is the normal outcome for a few gauges; server
/// errors, transport failures and undecodable bodies point at the service
/// or an API change.
pub fn classify_fetch_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::HttpError(400..=499) => FailureType::Expected,
        FetchError::HttpError(500..=599) => FailureType::Unexpected,
        FetchError::HttpError(_) => FailureType::Unknown,
        FetchError::TransportError(_) | FetchError::ParseError(_) => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(site_id: Option<&str>, operation: &str, err: &FetchError) {
    let failure_type = classify_fetch_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);
    emit(failure_type.log_level(), DataSource::Pegelonline, site_id, &message);
}

// ---------------------------------------------------------------------------
// Series Summary Logging
// ---------------------------------------------------------------------------

/// Log how many of the selected stations produced data
pub fn log_series_summary(total: usize, populated: usize, empty: usize) {
    let message = format!(
        "Series fetch complete: {}/{} with data, {} empty",
        populated, total, empty
    );

    if empty == 0 {
        info(DataSource::Pegelonline, None, &message);
    } else if populated == 0 {
        error(DataSource::Pegelonline, None, &message);
    } else {
        warn(DataSource::Pegelonline, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_maps_onto_log_crate() {
        assert_eq!(LogLevel::Warning.as_log_level(), log::Level::Warn);
        assert_eq!(LogLevel::Debug.as_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_verbose_overrides_rust_log() {
        assert_eq!(global_level(true, LogLevel::Debug), Some(log::LevelFilter::Debug));
        assert_eq!(global_level(true, LogLevel::Info), None);
        assert_eq!(global_level(false, LogLevel::Info), Some(log::LevelFilter::Info));
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(classify_fetch_failure(&FetchError::HttpError(404)), FailureType::Expected);
        assert_eq!(classify_fetch_failure(&FetchError::HttpError(418)), FailureType::Expected);
        assert_eq!(classify_fetch_failure(&FetchError::HttpError(503)), FailureType::Unexpected);
        assert_eq!(
            classify_fetch_failure(&FetchError::TransportError("connection refused".into())),
            FailureType::Unexpected
        );
        assert_eq!(
            classify_fetch_failure(&FetchError::ParseError("eof".into())),
            FailureType::Unexpected
        );
        assert_eq!(classify_fetch_failure(&FetchError::HttpError(304)), FailureType::Unknown);
    }

    #[test]
    fn test_client_errors_log_at_warn_server_errors_at_error() {
        let not_found = classify_fetch_failure(&FetchError::HttpError(404));
        assert_eq!(not_found.log_level(), LogLevel::Warning);
        let unavailable = classify_fetch_failure(&FetchError::HttpError(503));
        assert_eq!(unavailable.log_level(), LogLevel::Error);
        let refused = classify_fetch_failure(&FetchError::TransportError("refused".into()));
        assert_eq!(refused.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_entry_format_includes_site() {
        assert_eq!(
            format_entry(&DataSource::Pegelonline, Some("PASSAU DONAU"), "ok"),
            "PEGEL [PASSAU DONAU]: ok"
        );
        assert_eq!(format_entry(&DataSource::Config, None, "start"), "CONFIG: start");
    }
}
