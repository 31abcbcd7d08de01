//! Core error types for goalcal-core.
//!
//! This module defines the error hierarchy using thiserror. The pure
//! computation modules (date, status, streak, stats) never fail on
//! well-formed input; everything fallible lives in storage, config,
//! auth and the write-boundary validation.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for goalcal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Application configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Write-boundary validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be created or resolved
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Provisioning collision on the tenant key
    #[error("Calendar '{0}' already exists")]
    CalendarExists(String),

    /// Lookup for a tenant that was never provisioned
    #[error("Calendar '{0}' not found")]
    CalendarNotFound(String),

    /// A stored JSON payload no longer deserializes
    #[error("Invalid stored payload: {0}")]
    BadPayload(#[from] serde_json::Error),
}

/// Application configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Stored password hash does not match the expected encoding
    #[error("Stored password hash is malformed")]
    InvalidPasswordHash,

    /// Token could not be decoded into its parts
    #[error("Session token is malformed")]
    TokenMalformed,

    /// Token parts decoded but the HMAC does not match
    #[error("Session token signature mismatch")]
    SignatureMismatch,

    /// Token is older than the configured TTL
    #[error("Session token expired")]
    TokenExpired,

    /// Login with an unknown calendar or wrong password
    #[error("Wrong calendar id or password")]
    BadCredentials,
}

/// Write-boundary validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date string did not parse as YYYY-MM-DD
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Calendar id must be a lowercase slug
    #[error("Calendar id '{0}' may only contain lowercase letters, digits and dashes")]
    InvalidCalendarId(String),

    /// Goal list size out of bounds
    #[error("A calendar needs between 1 and 10 goals, got {0}")]
    GoalCount(usize),

    /// Two goals share an id
    #[error("Duplicate goal id '{0}'")]
    DuplicateGoalId(String),

    /// Goal with an empty id or name
    #[error("Every goal needs a non-empty id and name")]
    EmptyGoalField,

    /// Trackable list size out of bounds
    #[error("At most 10 trackables allowed, got {0}")]
    TrackableCount(usize),

    /// Two trackables share an id
    #[error("Duplicate trackable id '{0}'")]
    DuplicateTrackableId(String),

    /// Trackable with an empty id or name
    #[error("Every trackable needs a non-empty id and name")]
    EmptyTrackableField,

    /// Yellow tier must sit strictly below green
    #[error("Yellow threshold ({yellow}) must be below green ({green})")]
    ThresholdOrder { green: u32, yellow: u32 },

    /// Green tier needs at least one goal
    #[error("Green threshold must be at least 1")]
    ThresholdZeroGreen,

    /// Day entry dated outside the calendar's year
    #[error("Date {date} is outside calendar year {year}")]
    DateOutsideYear { date: NaiveDate, year: i32 },

    /// Day entry dated after "today"
    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),

    /// Day entry references a goal id the calendar does not configure
    #[error("Unknown goal id '{0}' in day entry")]
    UnknownGoalId(String),

    /// Day entry references a trackable id the calendar does not configure
    #[error("Unknown trackable id '{0}' in day entry")]
    UnknownTrackableId(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
