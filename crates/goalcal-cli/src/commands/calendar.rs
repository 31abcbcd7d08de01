//! Calendar settings commands.

use chrono::Utc;
use clap::Subcommand;
use goalcal_core::calendar::{validate_goals, validate_trackables};
use goalcal_core::storage::CalendarStore;
use goalcal_core::{ColorThreshold, Goal, Trackable, TrackableKind};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show a calendar's settings
    Show {
        /// Calendar id
        calendar_id: String,
    },
    /// Rename the calendar
    SetName {
        /// Calendar id
        calendar_id: String,
        /// New display name
        name: String,
    },
    /// Change the color threshold
    SetThreshold {
        /// Calendar id
        calendar_id: String,
        /// Green cutoff (>= 1)
        green: u32,
        /// Yellow cutoff, 0 disables the tier
        yellow: u32,
    },
    /// Add a goal
    AddGoal {
        /// Calendar id
        calendar_id: String,
        /// Goal display name
        name: String,
        /// Goal id (default: generated)
        #[arg(long)]
        id: Option<String>,
    },
    /// Rename a goal, keeping its recorded history
    RenameGoal {
        /// Calendar id
        calendar_id: String,
        /// Goal id
        id: String,
        /// New display name
        name: String,
    },
    /// Remove a goal
    RemoveGoal {
        /// Calendar id
        calendar_id: String,
        /// Goal id
        id: String,
    },
    /// Add a trackable
    AddTrackable {
        /// Calendar id
        calendar_id: String,
        /// Trackable display name
        name: String,
        /// Value kind: boolean or number
        #[arg(long, default_value = "boolean")]
        kind: String,
        /// Unit label for number trackables
        #[arg(long)]
        unit: Option<String>,
        /// Trackable id (default: generated)
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a trackable
    RemoveTrackable {
        /// Calendar id
        calendar_id: String,
        /// Trackable id
        id: String,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = CalendarStore::open()?;

    match action {
        CalendarAction::Show { calendar_id } => {
            let config = store.require_config(&calendar_id)?;
            println!("{}", serde_json::to_string_pretty(&config.public())?);
            return Ok(());
        }
        CalendarAction::SetName { calendar_id, name } => {
            let mut config = store.require_config(&calendar_id)?;
            config.name = name;
            save(&store, config)?;
        }
        CalendarAction::SetThreshold {
            calendar_id,
            green,
            yellow,
        } => {
            let threshold = ColorThreshold { green, yellow };
            threshold.validate()?;
            let mut config = store.require_config(&calendar_id)?;
            config.color_threshold = threshold;
            save(&store, config)?;
        }
        CalendarAction::AddGoal {
            calendar_id,
            name,
            id,
        } => {
            let mut config = store.require_config(&calendar_id)?;
            config.goals.push(Goal {
                id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                name,
            });
            validate_goals(&config.goals)?;
            save(&store, config)?;
        }
        CalendarAction::RenameGoal {
            calendar_id,
            id,
            name,
        } => {
            let mut config = store.require_config(&calendar_id)?;
            let goal = config
                .goals
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or_else(|| format!("no goal with id '{id}'"))?;
            goal.name = name;
            save(&store, config)?;
        }
        CalendarAction::RemoveGoal { calendar_id, id } => {
            let mut config = store.require_config(&calendar_id)?;
            let before = config.goals.len();
            config.goals.retain(|g| g.id != id);
            if config.goals.len() == before {
                return Err(format!("no goal with id '{id}'").into());
            }
            validate_goals(&config.goals)?;
            save(&store, config)?;
        }
        CalendarAction::AddTrackable {
            calendar_id,
            name,
            kind,
            unit,
            id,
        } => {
            let kind = match kind.as_str() {
                "boolean" => TrackableKind::Boolean,
                "number" => TrackableKind::Number,
                other => return Err(format!("unknown trackable kind '{other}'").into()),
            };
            let mut config = store.require_config(&calendar_id)?;
            config.trackables.push(Trackable {
                id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                name,
                kind,
                unit,
            });
            validate_trackables(&config.trackables)?;
            save(&store, config)?;
        }
        CalendarAction::RemoveTrackable { calendar_id, id } => {
            let mut config = store.require_config(&calendar_id)?;
            let before = config.trackables.len();
            config.trackables.retain(|t| t.id != id);
            if config.trackables.len() == before {
                return Err(format!("no trackable with id '{id}'").into());
            }
            save(&store, config)?;
        }
    }
    Ok(())
}

fn save(
    store: &CalendarStore,
    mut config: goalcal_core::CalendarConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    config.updated_at = Utc::now();
    store.update_config(&config)?;
    println!("{}", serde_json::to_string_pretty(&config.public())?);
    Ok(())
}
