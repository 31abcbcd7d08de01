//! Aggregate statistics over a calendar year.
//!
//! Rolls a year's day entries up into overall tier counts, per-goal
//! completion rates and a weekday breakdown, and embeds the streak
//! summary. Pure function of (entries, config, today); entries are read
//! once, no state is kept between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarConfig, DayEntry};
use crate::date::weekday_index;
use crate::status::{classify_day, is_perfect_day, DayStatus};
use crate::streak::{compute_streaks, StreakSummary};

/// Short weekday names indexed 0 = Sunday .. 6 = Saturday.
const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday buckets in display order, Monday through Sunday.
const WEEKDAY_DISPLAY_ORDER: [u32; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Entry counts per status tier.
///
/// `empty` is not counted: an empty day has no record to count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    /// Days where every configured goal was completed
    pub perfect: u32,
}

/// Completion rate of one configured goal.
///
/// `total` counts entries that mention the goal id at all; entries that
/// never mention it do not dilute the percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStat {
    pub id: String,
    pub name: String,
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Green rate for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayStat {
    /// 0 = Sunday .. 6 = Saturday
    pub day: u32,
    pub name: String,
    pub green: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Full statistics report for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    pub calendar_name: String,
    pub year: i32,
    pub overall: OverallStats,
    pub streak: StreakSummary,
    pub goals: Vec<GoalStat>,
    /// Monday first, Sunday last
    pub weekdays: Vec<WeekdayStat>,
}

/// Nearest-integer percentage, rounding half up. 0 when `whole` is 0.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

/// Compute the full year report.
pub fn compute_year_stats(
    entries: &[DayEntry],
    config: &CalendarConfig,
    today: NaiveDate,
) -> YearStats {
    let mut overall = OverallStats {
        total: entries.len() as u32,
        ..OverallStats::default()
    };

    let mut goal_counts = vec![(0u32, 0u32); config.goals.len()];
    let mut weekday_counts = [(0u32, 0u32); 7];

    for entry in entries {
        let status = classify_day(Some(entry), &config.color_threshold);
        match status {
            DayStatus::Green => overall.green += 1,
            DayStatus::Yellow => overall.yellow += 1,
            DayStatus::Red => overall.red += 1,
            DayStatus::Empty => {}
        }
        if is_perfect_day(entry, config) {
            overall.perfect += 1;
        }

        for (goal, counts) in config.goals.iter().zip(goal_counts.iter_mut()) {
            if let Some(done) = entry.goals.get(&goal.id) {
                counts.1 += 1;
                if *done {
                    counts.0 += 1;
                }
            }
        }

        let bucket = &mut weekday_counts[weekday_index(entry.date) as usize];
        bucket.1 += 1;
        if status == DayStatus::Green {
            bucket.0 += 1;
        }
    }

    let goals = config
        .goals
        .iter()
        .zip(goal_counts)
        .map(|(goal, (completed, total))| GoalStat {
            id: goal.id.clone(),
            name: goal.name.clone(),
            completed,
            total,
            percentage: percentage(completed, total),
        })
        .collect();

    let weekdays = WEEKDAY_DISPLAY_ORDER
        .iter()
        .map(|&day| {
            let (green, total) = weekday_counts[day as usize];
            WeekdayStat {
                day,
                name: WEEKDAY_NAMES[day as usize].to_string(),
                green,
                total,
                percentage: percentage(green, total),
            }
        })
        .collect();

    YearStats {
        calendar_name: config.name.clone(),
        year: config.year,
        overall,
        streak: compute_streaks(entries, &config.color_threshold, today),
        goals,
        weekdays,
    }
}
