//! Warning-level threshold checking.
//!
//! Threshold levels are plain `(value, label)` pairs from the config. The
//! charts draw them as horizontal lines; this module answers the question
//! the lines are there for: which level has the latest reading reached?

use crate::model::ThresholdLevel;

/// Returns `true` if the levels are strictly ascending by value.
///
/// `classify_level` relies on this ordering to report the highest level
/// reached; config loading rejects anything else.
pub fn is_ascending(levels: &[ThresholdLevel]) -> bool {
    levels.windows(2).all(|pair| pair[0].value < pair[1].value)
}

/// The highest level whose value the reading meets or exceeds.
///
/// Returns `None` if the reading is below the lowest level.
pub fn classify_level(value: f64, levels: &[ThresholdLevel]) -> Option<&ThresholdLevel> {
    levels.iter().rev().find(|level| value >= level.value)
}
