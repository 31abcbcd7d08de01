//! Day entry commands.
//!
//! `set` is the write boundary: it validates dates (calendar year, not
//! in the future) and goal/trackable keys against the calendar config
//! before anything is stored. A set replaces the whole record for that
//! date -- partial goal maps are not merged.

use std::collections::BTreeMap;

use chrono::{Local, Utc};
use clap::Subcommand;
use goalcal_core::calendar::validate_day_entry;
use goalcal_core::date::parse_date;
use goalcal_core::storage::CalendarStore;
use goalcal_core::{DayEntry, TrackableValue};

#[derive(Subcommand)]
pub enum DayAction {
    /// Record or overwrite one day
    Set {
        /// Calendar id
        calendar_id: String,
        /// Day in YYYY-MM-DD form
        date: String,
        /// Goal completion as id=true|false, repeatable
        #[arg(long = "goal", value_name = "ID=BOOL")]
        goals: Vec<String>,
        /// Trackable value as id=VALUE, repeatable
        #[arg(long = "trackable", value_name = "ID=VALUE")]
        trackables: Vec<String>,
    },
    /// Show one day's record
    Show {
        /// Calendar id
        calendar_id: String,
        /// Day in YYYY-MM-DD form
        date: String,
    },
    /// Delete one day's record
    Remove {
        /// Calendar id
        calendar_id: String,
        /// Day in YYYY-MM-DD form
        date: String,
    },
    /// List every recorded day of the calendar's year
    List {
        /// Calendar id
        calendar_id: String,
    },
}

pub fn run(action: DayAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = CalendarStore::open()?;

    match action {
        DayAction::Set {
            calendar_id,
            date,
            goals,
            trackables,
        } => {
            let config = store.require_config(&calendar_id)?;
            let date = parse_date(&date)?;

            let mut goal_map = BTreeMap::new();
            for pair in &goals {
                let (id, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("invalid goal flag '{pair}', expected ID=BOOL"))?;
                let done: bool = value
                    .parse()
                    .map_err(|_| format!("invalid goal value '{value}', expected true|false"))?;
                goal_map.insert(id.to_string(), done);
            }

            let mut trackable_map = BTreeMap::new();
            for pair in &trackables {
                let (id, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("invalid trackable flag '{pair}', expected ID=VALUE"))?;
                let value = parse_trackable_value(value)
                    .ok_or_else(|| format!("invalid trackable value '{value}'"))?;
                trackable_map.insert(id.to_string(), value);
            }

            let entry = DayEntry {
                calendar_id: config.calendar_id.clone(),
                date,
                goals: goal_map,
                trackables: (!trackable_map.is_empty()).then_some(trackable_map),
                updated_at: Utc::now(),
            };

            let today = Local::now().date_naive();
            validate_day_entry(&config, &entry, today)?;
            store.upsert_day(&entry)?;

            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        DayAction::Show { calendar_id, date } => {
            let date = parse_date(&date)?;
            let entry = store.get_day(&calendar_id, date)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        DayAction::Remove { calendar_id, date } => {
            let date = parse_date(&date)?;
            if store.delete_day(&calendar_id, date)? {
                println!("Removed {date}");
            } else {
                println!("No entry for {date}");
            }
        }
        DayAction::List { calendar_id } => {
            let config = store.require_config(&calendar_id)?;
            let entries = store.year_entries(&calendar_id, config.year)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn parse_trackable_value(raw: &str) -> Option<TrackableValue> {
    if let Ok(flag) = raw.parse::<bool>() {
        return Some(TrackableValue::Flag(flag));
    }
    raw.parse::<f64>().ok().map(TrackableValue::Amount)
}
