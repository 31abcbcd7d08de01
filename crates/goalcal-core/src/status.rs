//! Day status classification.
//!
//! Maps a day's recorded goal completions against the calendar's color
//! threshold to one of four tiers. The classifier is total: it never
//! fails, even on thresholds the write boundary would have rejected.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarConfig, ColorThreshold, DayEntry};

/// Status tier of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// No record, or a record with an empty goals map
    Empty,
    /// Recorded, below the yellow cutoff
    Red,
    /// At or above the yellow cutoff, below green
    Yellow,
    /// At or above the green cutoff
    Green,
}

/// Classify one day.
///
/// Completed count is the number of `true` values in the goals map; keys
/// that are not configured goal ids still count when true (stored data is
/// trusted here -- the write boundary rejects unknown keys for new
/// writes). A non-empty all-false map is red, never empty: the user
/// opened the day and recorded failure, which is different from never
/// touching it.
pub fn classify_day(entry: Option<&DayEntry>, threshold: &ColorThreshold) -> DayStatus {
    let Some(entry) = entry else {
        return DayStatus::Empty;
    };

    let completed = entry.goals.values().filter(|done| **done).count() as u32;

    if completed >= threshold.green {
        return DayStatus::Green;
    }
    let yellow = threshold.effective_yellow();
    if yellow > 0 && completed >= yellow {
        return DayStatus::Yellow;
    }
    if entry.goals.is_empty() {
        return DayStatus::Empty;
    }
    DayStatus::Red
}

/// Whether every configured goal was completed on this day.
///
/// A derived presentation flag, not a status tier. False for calendars
/// with zero configured goals.
pub fn is_perfect_day(entry: &DayEntry, config: &CalendarConfig) -> bool {
    if config.goals.is_empty() {
        return false;
    }
    let completed = entry.goals.values().filter(|done| **done).count();
    completed == config.goals.len()
}
