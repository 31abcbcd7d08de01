//! Consecutive-day streak computation.
//!
//! Two independent streaks share one algorithm parameterized by the
//! qualifying-date set:
//! - **activity**: dates that have any day entry at all
//! - **achievement**: dates the classifier scores green
//!
//! "today" is caller-supplied so results are deterministic under test.
//! A current streak survives exactly one day without an entry: it is
//! active when the most recent qualifying date is today or yesterday.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{ColorThreshold, DayEntry};
use crate::date::days_between;
use crate::status::{classify_day, DayStatus};

/// One streak: the ongoing run and the longest run ever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleStreak {
    /// Length of the active run, 0 when broken
    pub current: u32,
    /// Oldest date of the active run
    pub current_start: Option<NaiveDate>,
    /// Length of the longest run
    pub longest: u32,
    /// Oldest date of the longest run
    pub longest_start: Option<NaiveDate>,
    /// Most recent date of the longest run
    pub longest_end: Option<NaiveDate>,
}

/// Activity and achievement streaks for one calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Consecutive green days
    pub achievement: SingleStreak,
    /// Consecutive days with any entry
    pub activity: SingleStreak,
    /// Most recent green day, streak or not
    pub last_green_date: Option<NaiveDate>,
}

/// Compute both streaks over a calendar's entries.
///
/// The two qualifying sets are derived independently and fed through
/// [`streak_from_dates`]; an achievement streak can be shorter than the
/// activity streak but never longer.
pub fn compute_streaks(
    entries: &[DayEntry],
    threshold: &ColorThreshold,
    today: NaiveDate,
) -> StreakSummary {
    let mut green_dates: Vec<NaiveDate> = entries
        .iter()
        .filter(|e| classify_day(Some(e), threshold) == DayStatus::Green)
        .map(|e| e.date)
        .collect();
    let activity_dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let achievement = streak_from_dates(&green_dates, today);
    let activity = streak_from_dates(&activity_dates, today);

    green_dates.sort_unstable();
    let last_green_date = green_dates.last().copied();

    StreakSummary {
        achievement,
        activity,
        last_green_date,
    }
}

/// Compute one streak from a set of qualifying dates.
///
/// The current streak is anchored at the most recent qualifying date and
/// only counted when that date is today or yesterday; it then extends
/// backwards while each step is exactly one calendar day. The longest
/// streak is found in a single descending scan over consecutive runs.
/// When the current streak matches or beats the longest historical run,
/// the reported longest window is the current run.
pub fn streak_from_dates(dates: &[NaiveDate], today: NaiveDate) -> SingleStreak {
    if dates.is_empty() {
        return SingleStreak::default();
    }

    // Most recent first; duplicates collapse since dates key entries.
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    let most_recent = sorted[0];
    let is_active =
        most_recent == today || today.pred_opt().is_some_and(|y| most_recent == y);

    let mut current = 0u32;
    let mut current_start = None;
    if is_active {
        let mut expected = Some(most_recent);
        for &date in &sorted {
            match expected {
                Some(want) if date == want => {
                    current += 1;
                    current_start = Some(date);
                    expected = want.pred_opt();
                }
                _ => break,
            }
        }
    }

    let mut longest = 0u32;
    let mut longest_start = None;
    let mut longest_end = None;
    let mut run_len = 1u32;
    let mut run_end = sorted[0];
    for i in 1..sorted.len() {
        let newer = sorted[i - 1];
        let older = sorted[i];
        if days_between(older, newer) == 1 {
            run_len += 1;
        } else {
            if run_len > longest {
                longest = run_len;
                longest_start = Some(newer);
                longest_end = Some(run_end);
            }
            run_len = 1;
            run_end = older;
        }
    }
    if run_len > longest {
        longest = run_len;
        longest_start = sorted.last().copied();
        longest_end = Some(run_end);
    }

    if current > longest {
        longest = current;
        longest_start = current_start;
        longest_end = Some(most_recent);
    } else if current == longest && current > 0 {
        // Tie: the ongoing run is the one reported.
        longest_start = current_start;
        longest_end = Some(most_recent);
    }

    SingleStreak {
        current,
        current_start,
        longest,
        longest_start,
        longest_end,
    }
}
