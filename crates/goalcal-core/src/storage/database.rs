//! SQLite-backed tenant store.
//!
//! One table keyed `(calendar_id, entry_type)` holds every record as a
//! JSON payload: the tenant config under entry type `CONFIG` and one row
//! per day under `DAY#YYYY-MM-DD`. The day key makes year lookups a
//! prefix match and upserts an idempotent replace -- at most one row per
//! (calendar, date), last write wins.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::calendar::{CalendarConfig, DayEntry};
use crate::date::format_date;
use crate::error::DatabaseError;

const CONFIG_ENTRY_TYPE: &str = "CONFIG";

fn day_entry_type(date: NaiveDate) -> String {
    format!("DAY#{}", format_date(date))
}

/// SQLite store for calendar configs and day entries.
pub struct CalendarStore {
    conn: Connection,
}

impl CalendarStore {
    /// Open the store at `data_dir()/goalcal.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("goalcal.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                calendar_id TEXT NOT NULL,
                entry_type  TEXT NOT NULL,
                payload     TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                PRIMARY KEY (calendar_id, entry_type)
            );

            CREATE INDEX IF NOT EXISTS idx_items_entry_type ON items(entry_type);",
        )?;
        Ok(())
    }

    // === Calendar configs ===

    /// Provision a new calendar. Fails if the id is already taken.
    pub fn create_calendar(&self, config: &CalendarConfig) -> Result<(), DatabaseError> {
        if self.get_config(&config.calendar_id)?.is_some() {
            return Err(DatabaseError::CalendarExists(config.calendar_id.clone()));
        }
        self.put_config(config)
    }

    /// Overwrite an existing calendar's config.
    ///
    /// The caller is responsible for carrying over `created_at` and
    /// bumping `updated_at`; this is a plain keyed replace.
    pub fn update_config(&self, config: &CalendarConfig) -> Result<(), DatabaseError> {
        if self.get_config(&config.calendar_id)?.is_none() {
            return Err(DatabaseError::CalendarNotFound(config.calendar_id.clone()));
        }
        self.put_config(config)
    }

    fn put_config(&self, config: &CalendarConfig) -> Result<(), DatabaseError> {
        let payload = serde_json::to_string(config)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO items (calendar_id, entry_type, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                config.calendar_id,
                CONFIG_ENTRY_TYPE,
                payload,
                config.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch a calendar config, or `None` for an unknown id.
    pub fn get_config(&self, calendar_id: &str) -> Result<Option<CalendarConfig>, DatabaseError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM items WHERE calendar_id = ?1 AND entry_type = ?2",
                params![calendar_id, CONFIG_ENTRY_TYPE],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Fetch a calendar config, failing on an unknown id.
    pub fn require_config(&self, calendar_id: &str) -> Result<CalendarConfig, DatabaseError> {
        self.get_config(calendar_id)?
            .ok_or_else(|| DatabaseError::CalendarNotFound(calendar_id.to_string()))
    }

    /// All provisioned calendars, ordered by id.
    pub fn list_calendars(&self) -> Result<Vec<CalendarConfig>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM items WHERE entry_type = ?1 ORDER BY calendar_id",
        )?;
        let rows = stmt.query_map(params![CONFIG_ENTRY_TYPE], |row| row.get::<_, String>(0))?;

        let mut configs = Vec::new();
        for row in rows {
            configs.push(serde_json::from_str(&row?)?);
        }
        Ok(configs)
    }

    // === Day entries ===

    /// Write a day entry, replacing any existing record for the date.
    pub fn upsert_day(&self, entry: &DayEntry) -> Result<(), DatabaseError> {
        let payload = serde_json::to_string(entry)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO items (calendar_id, entry_type, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.calendar_id,
                day_entry_type(entry.date),
                payload,
                entry.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch one day entry, or `None` when the day was never recorded.
    pub fn get_day(
        &self,
        calendar_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DayEntry>, DatabaseError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM items WHERE calendar_id = ?1 AND entry_type = ?2",
                params![calendar_id, day_entry_type(date)],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Delete one day entry. Returns whether a record existed.
    pub fn delete_day(&self, calendar_id: &str, date: NaiveDate) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM items WHERE calendar_id = ?1 AND entry_type = ?2",
            params![calendar_id, day_entry_type(date)],
        )?;
        Ok(deleted > 0)
    }

    /// All day entries of one calendar year, date-ascending.
    pub fn year_entries(
        &self,
        calendar_id: &str,
        year: i32,
    ) -> Result<Vec<DayEntry>, DatabaseError> {
        let prefix = format!("DAY#{year:04}-%");
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM items
             WHERE calendar_id = ?1 AND entry_type LIKE ?2
             ORDER BY entry_type",
        )?;
        let rows = stmt.query_map(params![calendar_id, prefix], |row| row.get::<_, String>(0))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(serde_json::from_str(&row?)?);
        }
        Ok(entries)
    }
}
