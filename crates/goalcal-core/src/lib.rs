//! # Goalcal Core Library
//!
//! This library provides the core logic for Goalcal, a small
//! multi-tenant goal-tracking calendar: each tenant tracks daily
//! completion of a handful of goals across a year, every day gets a
//! color status from threshold rules, and streak and aggregate
//! statistics are derived from the stored days. It follows a CLI-first
//! philosophy: all operations are available through the standalone
//! `goalcal` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Date utility**: pure calendar-date arithmetic on `NaiveDate`
//! - **Status classifier**: per-day tier from goal completions vs. the
//!   calendar's color threshold
//! - **Streak engine**: current/longest consecutive-day runs for both
//!   "any activity" and "green day" predicates
//! - **Aggregate statistics**: overall, per-goal and per-weekday rollups
//! - **Storage**: one SQLite table keyed (calendar, entry type) holding
//!   JSON payloads, plus TOML application configuration
//! - **Auth**: PBKDF2 password hashes and HMAC-signed session tokens
//!
//! The computation core is a pure function of (entries, threshold,
//! today): no shared state, safe to call concurrently, deterministic
//! under test because "today" is caller-supplied.

pub mod auth;
pub mod calendar;
pub mod date;
pub mod error;
pub mod stats;
pub mod status;
pub mod storage;
pub mod streak;

pub use calendar::{
    CalendarConfig, ColorThreshold, DayEntry, Goal, PublicCalendarConfig, Trackable,
    TrackableKind, TrackableValue,
};
pub use error::{AuthError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use stats::{compute_year_stats, GoalStat, OverallStats, WeekdayStat, YearStats};
pub use status::{classify_day, is_perfect_day, DayStatus};
pub use storage::{AppConfig, CalendarStore};
pub use streak::{compute_streaks, SingleStreak, StreakSummary};
