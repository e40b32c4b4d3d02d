//! SQLite-backed persistence for notification schedules.
//!
//! One `schedules` table holds everything. The store assigns both the row id
//! and the creation timestamp (`datetime('now')`, UTC) so that a schedule's
//! recurrence anchor is the database's clock, not the caller's.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;
use crate::schedule::{Schedule, ScheduleDraft};

/// Durable store of notification schedules.
pub struct ScheduleStore {
    conn: Connection,
}

impl ScheduleStore {
    /// Open or create the database at `path`, creating the table if missing.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        debug!(path = %path.display(), "schedule store ready");
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schedules (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_on TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                rule TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Insert a draft, returning the assigned id.
    pub fn create(&self, draft: &ScheduleDraft) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO schedules (created_on, title, body, rule)
             VALUES (datetime('now'), ?1, ?2, ?3)",
            rusqlite::params![draft.title, draft.body, draft.rule],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Load every schedule, oldest first.
    pub fn list(&self) -> Result<Vec<Schedule>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, created_on, title, body, rule FROM schedules ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let created_raw: String = row.get(1)?;
            let created_on = parse_created_on(&created_raw).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Schedule {
                id: row.get(0)?,
                created_on,
                title: row.get(2)?,
                body: row.get(3)?,
                rule: row.get(4)?,
            })
        })?;

        let mut schedules = Vec::new();
        for row in rows {
            schedules.push(row?);
        }
        Ok(schedules)
    }
}

/// Parse the `datetime('now')` column format (`YYYY-MM-DD HH:MM:SS`, UTC).
fn parse_created_on(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
