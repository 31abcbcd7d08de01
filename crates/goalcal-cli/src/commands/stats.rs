//! Year statistics commands.

use chrono::Local;
use clap::Subcommand;
use goalcal_core::compute_year_stats;
use goalcal_core::storage::CalendarStore;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Full year report: overall, streaks, per-goal, per-weekday
    Show {
        /// Calendar id
        calendar_id: String,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = CalendarStore::open()?;

    match action {
        StatsAction::Show { calendar_id } => {
            let config = store.require_config(&calendar_id)?;
            let entries = store.year_entries(&calendar_id, config.year)?;
            let today = Local::now().date_naive();
            let stats = compute_year_stats(&entries, &config, today);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
