//! Save envelope: the versioned wrapper persisted under `emily-idle:save`.
//!
//! A snapshot captures the complete state needed to resume play,
//! plus the instant simulation last ran so offline time can be caught
//! up on the next load.

use crate::{state::GameState, types::EpochMs};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Bump on every save-shape change and add a step to the migration chain.
pub const CURRENT_SAVE_VERSION: u64 = 2;

pub const SAVE_KEY: &str = "emily-idle:save";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    pub version: u64,
    #[serde(default)]
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub last_simulated_at_ms: EpochMs,
    pub state: GameState,
}

impl SaveEnvelope {
    /// Wrap `state` for persistence at `now`.
    pub fn wrap(state: &GameState, now: EpochMs) -> Self {
        Self {
            version: CURRENT_SAVE_VERSION,
            saved_at: ms_to_datetime(now),
            last_simulated_at_ms: state.simulated_at_ms,
            state: state.clone(),
        }
    }

    /// Unwrap into a live state with the simulation cursor restored.
    pub fn into_state(self) -> GameState {
        let mut state = self.state;
        state.simulated_at_ms = self.last_simulated_at_ms;
        state
    }
}

pub fn ms_to_datetime(ms: EpochMs) -> DateTime<Utc> {
    let ms = i64::try_from(ms).unwrap_or(i64::MAX);
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or_default()
}
