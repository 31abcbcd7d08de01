mod config;
pub mod database;

pub use config::AppConfig;
pub use database::CalendarStore;

use std::path::PathBuf;

/// Returns `~/.config/goalcal[-dev]/` based on GOALCAL_ENV.
///
/// Set GOALCAL_ENV=dev to use the development data directory, or point
/// GOALCAL_DATA_DIR at an explicit directory (used by E2E tests to keep
/// state out of the home directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Ok(explicit) = std::env::var("GOALCAL_DATA_DIR") {
        PathBuf::from(explicit)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("GOALCAL_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("goalcal-dev")
        } else {
            base_dir.join("goalcal")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
