//! Store methods for the per-profile key-value slots (save, settings).
//!
//! RULE: Writes are staged. A blob is validated before the transaction
//! opens; a failed validation or a failed statement leaves the previous
//! value in place.

use crate::{
    error::{IdleError, IdleResult},
    save_codec,
    settings::{Settings, SETTINGS_KEY},
    snapshot::SAVE_KEY,
    state::GameState,
    types::EpochMs,
};
use rusqlite::{params, OptionalExtension};

use super::GameStore;

/// Outcome of a committed slot write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWrite {
    pub bytes: usize,
}

impl GameStore {
    pub fn read_slot(&self, profile_id: &str, key: &str) -> IdleResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE profile_id = ?1 AND key = ?2",
                params![profile_id, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replace the blob under `key`. `value` must be well-formed JSON.
    pub fn write_slot(
        &self,
        profile_id: &str,
        key: &str,
        value: &str,
        now: EpochMs,
    ) -> IdleResult<SlotWrite> {
        if let Err(e) = serde_json::from_str::<serde_json::Value>(value) {
            return Err(IdleError::MalformedSave {
                reason: format!("refusing to write unparseable blob to {key}: {e}"),
            });
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO kv_store (profile_id, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (profile_id, key)
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![profile_id, key, value, now as i64],
        )?;
        tx.commit()?;
        Ok(SlotWrite { bytes: value.len() })
    }

    pub fn delete_slot(&self, profile_id: &str, key: &str) -> IdleResult<()> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE profile_id = ?1 AND key = ?2",
            params![profile_id, key],
        )?;
        Ok(())
    }

    // ── Typed slots ───────────────────────────────────────────────

    pub fn read_save(&self, profile_id: &str) -> IdleResult<Option<String>> {
        self.read_slot(profile_id, SAVE_KEY)
    }

    /// Encode `state`, check the blob decodes back to the same state,
    /// then write it.
    pub fn write_save(&self, profile_id: &str, state: &GameState, now: EpochMs) -> IdleResult<SlotWrite> {
        let blob = save_codec::save(state, now)?;
        let (envelope, _) = save_codec::decode(&blob)?;
        if envelope.into_state() != *state {
            return Err(IdleError::MalformedSave {
                reason: "encoded save does not decode to the live state".to_string(),
            });
        }
        let written = self.write_slot(profile_id, SAVE_KEY, &blob, now)?;
        log::debug!("profile={profile_id} save written ({} bytes)", written.bytes);
        Ok(written)
    }

    pub fn read_settings(&self, profile_id: &str) -> IdleResult<Settings> {
        Ok(Settings::load(self.read_slot(profile_id, SETTINGS_KEY)?.as_deref()))
    }

    pub fn write_settings(&self, profile_id: &str, settings: &Settings, now: EpochMs) -> IdleResult<SlotWrite> {
        let json = settings.to_json()?;
        self.write_slot(profile_id, SETTINGS_KEY, &json, now)
    }
}
