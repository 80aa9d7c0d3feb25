//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Subsystems never touch persistence; the engine calls store methods.

use crate::{error::IdleResult, event::EventLogEntry};
use rusqlite::{params, Connection};

mod profile;
mod save_slot;

pub use save_slot::SlotWrite;

pub struct GameStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl GameStore {
    pub fn open(path: &str) -> IdleResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: Some(path.to_string()) })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> IdleResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases this is a new, empty database.
    pub fn reopen(&self) -> IdleResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order. Safe to call on every open.
    pub fn migrate(&self) -> IdleResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_storage.sql"))?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> IdleResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (profile_id, at_ms, subsystem, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.profile_id,
                entry.at_ms as i64,
                entry.subsystem,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    /// Every logged event for a profile, oldest first.
    pub fn events_for_profile(&self, profile_id: &str) -> IdleResult<Vec<EventLogEntry>> {
        self.events_after(profile_id, 0)
    }

    /// Logged events with row id greater than `after_id`, oldest first.
    pub fn events_after(&self, profile_id: &str, after_id: i64) -> IdleResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, profile_id, at_ms, subsystem, event_type, payload
             FROM event_log WHERE profile_id = ?1 AND id > ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![profile_id, after_id], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    profile_id: row.get(1)?,
                    at_ms:      row.get::<_, i64>(2)? as u64,
                    subsystem:  row.get(3)?,
                    event_type: row.get(4)?,
                    payload:    row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, profile_id: &str, event_type: &str) -> IdleResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE profile_id = ?1 AND event_type = ?2",
            params![profile_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
