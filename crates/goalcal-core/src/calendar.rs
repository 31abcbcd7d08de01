//! Tenant data model and write-boundary validation.
//!
//! A calendar is one isolated goal-tracking workspace identified by a
//! lowercase slug. Per-day completion is recorded as at most one
//! `DayEntry` per (calendar, date); overwrites are last-write-wins with
//! no merging of partial goal maps.
//!
//! Validation happens here, at the write boundary, so the read-side
//! computations (status, streak, stats) stay total over stored data.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Upper bound on configured goals per calendar.
pub const MAX_GOALS: usize = 10;
/// Upper bound on configured trackables per calendar.
pub const MAX_TRACKABLES: usize = 10;

/// One boolean daily objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
}

/// Value type a trackable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackableKind {
    Boolean,
    Number,
}

/// Auxiliary per-day measurement. Never affects day status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trackable {
    pub id: String,
    pub name: String,
    pub kind: TrackableKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A recorded trackable value: a flag or an amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackableValue {
    Flag(bool),
    Amount(f64),
}

/// Tier cutoffs for day coloring.
///
/// `completed >= green` is green, `completed >= yellow` (when yellow > 0)
/// is yellow, below that red. `yellow == 0` means there is no yellow tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorThreshold {
    pub green: u32,
    pub yellow: u32,
}

impl Default for ColorThreshold {
    fn default() -> Self {
        Self { green: 3, yellow: 1 }
    }
}

impl ColorThreshold {
    /// Reject thresholds that violate `green >= 1` or `yellow < green`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.green == 0 {
            return Err(ValidationError::ThresholdZeroGreen);
        }
        if self.yellow >= self.green {
            return Err(ValidationError::ThresholdOrder {
                green: self.green,
                yellow: self.yellow,
            });
        }
        Ok(())
    }

    /// Yellow cutoff with the `yellow < green` invariant enforced.
    ///
    /// The classifier must not misbehave on configs that slipped past the
    /// write boundary, so an out-of-order yellow is capped at `green - 1`.
    pub(crate) fn effective_yellow(&self) -> u32 {
        self.yellow.min(self.green.saturating_sub(1))
    }
}

/// Tenant record: one calendar's identity, goals and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub calendar_id: String,
    pub name: String,
    pub password_hash: String,
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub trackables: Vec<Trackable>,
    pub color_threshold: ColorThreshold,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarConfig {
    /// Validate the whole tenant record before it is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_calendar_id(&self.calendar_id)?;
        validate_goals(&self.goals)?;
        validate_trackables(&self.trackables)?;
        self.color_threshold.validate()
    }

    /// View with the password hash stripped, safe to print or serialize
    /// for callers.
    pub fn public(&self) -> PublicCalendarConfig {
        PublicCalendarConfig {
            calendar_id: self.calendar_id.clone(),
            name: self.name.clone(),
            goals: self.goals.clone(),
            trackables: self.trackables.clone(),
            color_threshold: self.color_threshold,
            year: self.year,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// `CalendarConfig` minus the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicCalendarConfig {
    pub calendar_id: String,
    pub name: String,
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub trackables: Vec<Trackable>,
    pub color_threshold: ColorThreshold,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One record per (calendar, date).
///
/// Absence of an entry for a date means "empty" status; an entry whose
/// goals map is present but has zero keys is also "empty", while a
/// non-empty all-false map is "red". The distinction is deliberate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub calendar_id: String,
    pub date: NaiveDate,
    pub goals: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trackables: Option<BTreeMap<String, TrackableValue>>,
    pub updated_at: DateTime<Utc>,
}

/// Placeholder goals for freshly provisioned calendars.
pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal { id: "g1".into(), name: "Goal 1".into() },
        Goal { id: "g2".into(), name: "Goal 2".into() },
        Goal { id: "g3".into(), name: "Goal 3".into() },
    ]
}

/// Calendar ids are lowercase slugs: `[a-z0-9-]+`.
pub fn validate_calendar_id(id: &str) -> Result<(), ValidationError> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidCalendarId(id.to_string()))
    }
}

/// Goals: 1..=10, unique non-empty ids, non-empty names.
pub fn validate_goals(goals: &[Goal]) -> Result<(), ValidationError> {
    if goals.is_empty() || goals.len() > MAX_GOALS {
        return Err(ValidationError::GoalCount(goals.len()));
    }
    let mut seen = HashSet::new();
    for goal in goals {
        if goal.id.is_empty() || goal.name.is_empty() {
            return Err(ValidationError::EmptyGoalField);
        }
        if !seen.insert(goal.id.as_str()) {
            return Err(ValidationError::DuplicateGoalId(goal.id.clone()));
        }
    }
    Ok(())
}

/// Trackables: 0..=10, unique non-empty ids, non-empty names.
pub fn validate_trackables(trackables: &[Trackable]) -> Result<(), ValidationError> {
    if trackables.len() > MAX_TRACKABLES {
        return Err(ValidationError::TrackableCount(trackables.len()));
    }
    let mut seen = HashSet::new();
    for trackable in trackables {
        if trackable.id.is_empty() || trackable.name.is_empty() {
            return Err(ValidationError::EmptyTrackableField);
        }
        if !seen.insert(trackable.id.as_str()) {
            return Err(ValidationError::DuplicateTrackableId(trackable.id.clone()));
        }
    }
    Ok(())
}

/// Write-boundary check for a day entry against its calendar.
///
/// Rejects dates outside `config.year` or after `today`, and any goal or
/// trackable key that does not correspond to a configured id. Unknown
/// keys are a validation error here even though the read-side classifier
/// tolerates them.
pub fn validate_day_entry(
    config: &CalendarConfig,
    entry: &DayEntry,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if entry.date.year() != config.year {
        return Err(ValidationError::DateOutsideYear {
            date: entry.date,
            year: config.year,
        });
    }
    if entry.date > today {
        return Err(ValidationError::FutureDate(entry.date));
    }
    for goal_id in entry.goals.keys() {
        if !config.goals.iter().any(|g| g.id == *goal_id) {
            return Err(ValidationError::UnknownGoalId(goal_id.clone()));
        }
    }
    if let Some(trackables) = &entry.trackables {
        for trackable_id in trackables.keys() {
            if !config.trackables.iter().any(|t| t.id == *trackable_id) {
                return Err(ValidationError::UnknownTrackableId(trackable_id.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_config() -> CalendarConfig {
        let now = Utc::now();
        CalendarConfig {
            calendar_id: "alice-2026".into(),
            name: "Alice".into(),
            password_hash: String::new(),
            goals: default_goals(),
            trackables: vec![Trackable {
                id: "steps".into(),
                name: "Steps".into(),
                kind: TrackableKind::Number,
                unit: Some("steps".into()),
            }],
            color_threshold: ColorThreshold::default(),
            year: 2026,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry_on(date: NaiveDate) -> DayEntry {
        DayEntry {
            calendar_id: "alice-2026".into(),
            date,
            goals: BTreeMap::from([("g1".to_string(), true)]),
            trackables: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn calendar_id_slug_rules() {
        assert!(validate_calendar_id("alice-2026").is_ok());
        assert!(validate_calendar_id("a1").is_ok());
        assert!(validate_calendar_id("").is_err());
        assert!(validate_calendar_id("Alice").is_err());
        assert!(validate_calendar_id("a b").is_err());
        assert!(validate_calendar_id("a_b").is_err());
    }

    #[test]
    fn goal_count_bounds() {
        assert!(validate_goals(&[]).is_err());
        let many: Vec<Goal> = (0..11)
            .map(|i| Goal { id: format!("g{i}"), name: format!("Goal {i}") })
            .collect();
        assert!(validate_goals(&many).is_err());
        assert!(validate_goals(&many[..10]).is_ok());
    }

    #[test]
    fn duplicate_goal_ids_rejected() {
        let goals = vec![
            Goal { id: "g1".into(), name: "A".into() },
            Goal { id: "g1".into(), name: "B".into() },
        ];
        assert!(matches!(
            validate_goals(&goals),
            Err(ValidationError::DuplicateGoalId(_))
        ));
    }

    #[test]
    fn threshold_ordering() {
        assert!(ColorThreshold { green: 3, yellow: 1 }.validate().is_ok());
        assert!(ColorThreshold { green: 3, yellow: 0 }.validate().is_ok());
        assert!(ColorThreshold { green: 3, yellow: 3 }.validate().is_err());
        assert!(ColorThreshold { green: 0, yellow: 0 }.validate().is_err());
    }

    #[test]
    fn effective_yellow_caps_out_of_order_configs() {
        assert_eq!(ColorThreshold { green: 3, yellow: 5 }.effective_yellow(), 2);
        assert_eq!(ColorThreshold { green: 3, yellow: 1 }.effective_yellow(), 1);
        assert_eq!(ColorThreshold { green: 1, yellow: 0 }.effective_yellow(), 0);
    }

    #[test]
    fn day_entry_year_and_future_checks() {
        let config = test_config();
        let today = naive(2026, 6, 15);

        assert!(validate_day_entry(&config, &entry_on(naive(2026, 6, 15)), today).is_ok());
        assert!(matches!(
            validate_day_entry(&config, &entry_on(naive(2025, 12, 31)), today),
            Err(ValidationError::DateOutsideYear { .. })
        ));
        assert!(matches!(
            validate_day_entry(&config, &entry_on(naive(2026, 6, 16)), today),
            Err(ValidationError::FutureDate(_))
        ));
    }

    #[test]
    fn day_entry_rejects_unknown_keys() {
        let config = test_config();
        let today = naive(2026, 6, 15);

        let mut entry = entry_on(naive(2026, 6, 1));
        entry.goals.insert("mystery".into(), true);
        assert!(matches!(
            validate_day_entry(&config, &entry, today),
            Err(ValidationError::UnknownGoalId(_))
        ));

        let mut entry = entry_on(naive(2026, 6, 1));
        entry.trackables = Some(BTreeMap::from([(
            "unknown".to_string(),
            TrackableValue::Amount(3.0),
        )]));
        assert!(matches!(
            validate_day_entry(&config, &entry, today),
            Err(ValidationError::UnknownTrackableId(_))
        ));

        let mut entry = entry_on(naive(2026, 6, 1));
        entry.trackables = Some(BTreeMap::from([(
            "steps".to_string(),
            TrackableValue::Amount(9000.0),
        )]));
        assert!(validate_day_entry(&config, &entry, today).is_ok());
    }

    #[test]
    fn trackable_value_serializes_untagged() {
        let flag = serde_json::to_string(&TrackableValue::Flag(true)).unwrap();
        assert_eq!(flag, "true");
        let amount = serde_json::to_string(&TrackableValue::Amount(2.5)).unwrap();
        assert_eq!(amount, "2.5");

        let parsed: TrackableValue = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, TrackableValue::Flag(false));
        let parsed: TrackableValue = serde_json::from_str("7.0").unwrap();
        assert_eq!(parsed, TrackableValue::Amount(7.0));
    }

    #[test]
    fn public_view_strips_password_hash() {
        let mut config = test_config();
        config.password_hash = "secret".into();
        let json = serde_json::to_string(&config.public()).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
