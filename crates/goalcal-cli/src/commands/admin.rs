//! Calendar provisioning and administration commands.

use chrono::Utc;
use clap::Subcommand;
use goalcal_core::calendar::{default_goals, validate_calendar_id};
use goalcal_core::storage::{AppConfig, CalendarStore};
use goalcal_core::{auth, CalendarConfig, ColorThreshold};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Provision a new calendar
    Create {
        /// Calendar id (lowercase slug)
        calendar_id: String,
        /// Display name
        name: String,
        /// Password for login
        password: String,
        /// Tracked year (default: the configured default year)
        #[arg(long)]
        year: Option<i32>,
        /// Green cutoff (default: 3)
        #[arg(long)]
        green: Option<u32>,
        /// Yellow cutoff, 0 disables the tier (default: 1)
        #[arg(long)]
        yellow: Option<u32>,
    },
    /// List all calendars
    List,
    /// Update a calendar, including password reset
    Update {
        /// Calendar id
        calendar_id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New password
        #[arg(long)]
        password: Option<String>,
        /// New tracked year
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn run(action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = CalendarStore::open()?;

    match action {
        AdminAction::Create {
            calendar_id,
            name,
            password,
            year,
            green,
            yellow,
        } => {
            let app = AppConfig::load()?;
            let calendar_id = calendar_id.to_lowercase();
            validate_calendar_id(&calendar_id)?;

            let defaults = ColorThreshold::default();
            let color_threshold = ColorThreshold {
                green: green.unwrap_or(defaults.green),
                yellow: yellow.unwrap_or(defaults.yellow),
            };
            color_threshold.validate()?;

            let now = Utc::now();
            let config = CalendarConfig {
                calendar_id: calendar_id.clone(),
                name,
                password_hash: auth::hash_password(&password),
                goals: default_goals(),
                trackables: Vec::new(),
                color_threshold,
                year: year.unwrap_or(app.default_year),
                created_at: now,
                updated_at: now,
            };
            config.validate()?;
            store.create_calendar(&config)?;

            println!("Calendar created: {calendar_id}");
            println!("{}", serde_json::to_string_pretty(&config.public())?);
        }
        AdminAction::List => {
            let calendars: Vec<_> = store
                .list_calendars()?
                .iter()
                .map(CalendarConfig::public)
                .collect();
            println!("{}", serde_json::to_string_pretty(&calendars)?);
        }
        AdminAction::Update {
            calendar_id,
            name,
            password,
            year,
        } => {
            let mut config = store.require_config(&calendar_id)?;
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(password) = password {
                config.password_hash = auth::hash_password(&password);
            }
            if let Some(year) = year {
                config.year = year;
            }
            config.updated_at = Utc::now();
            config.validate()?;
            store.update_config(&config)?;

            println!("{}", serde_json::to_string_pretty(&config.public())?);
        }
    }
    Ok(())
}
