//! Store methods for player profiles.

use crate::{
    error::{IdleError, IdleResult},
    types::{EpochMs, ProfileId},
};
use rusqlite::{params, OptionalExtension};

use super::GameStore;

impl GameStore {
    /// Create a profile with a fresh random id.
    pub fn create_profile(&self, label: &str, now: EpochMs) -> IdleResult<ProfileId> {
        let profile_id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO profile (profile_id, label, created_at) VALUES (?1, ?2, ?3)",
            params![profile_id, label, now as i64],
        )?;
        log::info!("created profile {profile_id} ({label})");
        Ok(profile_id)
    }

    /// Create the profile under a caller-chosen id if it is missing.
    pub fn ensure_profile(&self, profile_id: &str, label: &str, now: EpochMs) -> IdleResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO profile (profile_id, label, created_at) VALUES (?1, ?2, ?3)",
            params![profile_id, label, now as i64],
        )?;
        Ok(())
    }

    pub fn profile_label(&self, profile_id: &str) -> IdleResult<String> {
        self.conn
            .query_row(
                "SELECT label FROM profile WHERE profile_id = ?1",
                params![profile_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| IdleError::ProfileNotFound { profile_id: profile_id.to_string() })
    }

    pub fn profile_exists(&self, profile_id: &str) -> IdleResult<bool> {
        match self.profile_label(profile_id) {
            Ok(_) => Ok(true),
            Err(IdleError::ProfileNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// (profile_id, label) pairs, oldest first.
    pub fn list_profiles(&self) -> IdleResult<Vec<(ProfileId, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT profile_id, label FROM profile ORDER BY created_at ASC, profile_id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
