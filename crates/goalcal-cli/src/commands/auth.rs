//! Login and session token commands.

use chrono::Utc;
use clap::Subcommand;
use goalcal_core::auth::{self, SessionKeeper};
use goalcal_core::storage::{AppConfig, CalendarStore};
use goalcal_core::AuthError;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Check calendar credentials and print a session token
    Login {
        /// Calendar id
        calendar_id: String,
        /// Calendar password
        password: String,
    },
    /// Verify a session token and print the calendar id it belongs to
    Verify {
        /// Token from a previous login
        token: String,
    },
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = AppConfig::load()?;
    let keeper = SessionKeeper::new(&app.session_secret, app.session_ttl_days);

    match action {
        AuthAction::Login {
            calendar_id,
            password,
        } => {
            let store = CalendarStore::open()?;
            let calendar_id = calendar_id.to_lowercase();

            // Unknown calendar and wrong password answer identically.
            let valid = match store.get_config(&calendar_id)? {
                Some(config) => auth::verify_password(&password, &config.password_hash)?,
                None => false,
            };
            if !valid {
                return Err(AuthError::BadCredentials.into());
            }

            let token = keeper.issue(&calendar_id, Utc::now());
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "calendar_id": calendar_id,
                    "token": token,
                }))?
            );
        }
        AuthAction::Verify { token } => {
            let calendar_id = keeper.verify(&token, Utc::now())?;
            println!("{calendar_id}");
        }
    }
    Ok(())
}
