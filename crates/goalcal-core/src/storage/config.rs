//! TOML-based application configuration.
//!
//! Deployment-level settings, as opposed to per-calendar settings which
//! live in the store:
//! - the session-signing secret (generated on first load)
//! - session lifetime
//! - the year newly provisioned calendars default to
//!
//! Stored at `data_dir()/config.toml`.

use std::path::PathBuf;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// Application configuration.
///
/// Serialized to/from TOML at `data_dir()/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Secret behind session-token signatures. Empty means "not yet
    /// generated"; `load()` fills and persists it.
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
    /// Year assigned to new calendars when provisioning omits one.
    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_session_ttl_days() -> i64 {
    30
}

fn default_year() -> i32 {
    2026
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_days: default_session_ttl_days(),
            default_year: default_year(),
        }
    }
}

impl AppConfig {
    /// Load the config, creating it with a fresh session secret on first
    /// run. A config that exists but lacks a secret also gets one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?
        } else {
            AppConfig::default()
        };

        if config.session_secret.is_empty() {
            config.session_secret = generate_secret();
            config.save()?;
        }
        Ok(config)
    }

    /// Persist the config to `data_dir()/config.toml`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("<data dir>"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
