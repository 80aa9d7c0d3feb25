//! Game events: the record of everything that changed a profile.
//!
//! RULE: Every accepted or declined command, every threshold crossing
//! and every load/save is recorded as a GameEvent in the event log.
//! Two engines fed the same inputs produce identical logs.

use crate::types::{Cents, EntityId, EpochMs, ProfileId};
use serde::{Deserialize, Serialize};

/// Variants are append-only. Never remove or reorder them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Lifecycle ──────────────────────────────────
    SaveLoaded {
        at_ms:        EpochMs,
        origin:       String,
        from_version: Option<u64>,
    },
    CatchUpApplied {
        at_ms:       EpochMs,
        elapsed_ms:  u64,
        capped_ms:   u64,
        segments:    u32,
    },
    Saved {
        at_ms:  EpochMs,
        bytes:  usize,
    },

    // ── Commands ───────────────────────────────────
    Purchased {
        at_ms:     EpochMs,
        entity_id: EntityId,
        resource:  String,
        amount:    u64,
        owned:     u32,
    },
    CommandDeclined {
        at_ms:   EpochMs,
        command: String,
        kind:    String,
        reason:  String,
    },
    SessionTaken {
        at_ms:        EpochMs,
        payout_cents: Cents,
        level:        u32,
    },
    EventStarted {
        at_ms:    EpochMs,
        event_id: EntityId,
    },
    NostalgiaUnlockBought {
        at_ms:     EpochMs,
        unlock_id: EntityId,
        cost:      u64,
    },
    NostalgiaUnlockRefunded {
        at_ms:     EpochMs,
        unlock_id: EntityId,
    },
    PrestigeRequested {
        at_ms:          EpochMs,
        points_to_gain: u64,
    },
    PrestigeCancelled {
        at_ms: EpochMs,
    },
    PrestigeCommitted {
        at_ms:         EpochMs,
        points_gained: u64,
        resets:        u32,
    },
    SettingsChanged {
        at_ms: EpochMs,
        field: String,
    },

    // ── Derived ────────────────────────────────────
    CatalogDiscovered {
        at_ms:          EpochMs,
        entry_id:       EntityId,
        tiers_unlocked: Vec<EntityId>,
    },
    MilestoneReached {
        at_ms:        EpochMs,
        milestone_id: EntityId,
    },
    CareerLevelUp {
        at_ms: EpochMs,
        level: u32,
    },
    EventPhaseChanged {
        at_ms:    EpochMs,
        event_id: EntityId,
        from:     String,
        to:       String,
    },
    AchievementUnlocked {
        at_ms:          EpochMs,
        achievement_id: EntityId,
    },
    GameReset {
        at_ms: EpochMs,
    },
}

/// Stable string name of a GameEvent variant; the `event_type` column.
pub fn event_type_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::SaveLoaded { .. }              => "save_loaded",
        GameEvent::CatchUpApplied { .. }          => "catch_up_applied",
        GameEvent::Saved { .. }                   => "saved",
        GameEvent::Purchased { .. }               => "purchased",
        GameEvent::CommandDeclined { .. }         => "command_declined",
        GameEvent::SessionTaken { .. }            => "session_taken",
        GameEvent::EventStarted { .. }            => "event_started",
        GameEvent::NostalgiaUnlockBought { .. }   => "nostalgia_unlock_bought",
        GameEvent::NostalgiaUnlockRefunded { .. } => "nostalgia_unlock_refunded",
        GameEvent::PrestigeRequested { .. }       => "prestige_requested",
        GameEvent::PrestigeCancelled { .. }       => "prestige_cancelled",
        GameEvent::PrestigeCommitted { .. }       => "prestige_committed",
        GameEvent::SettingsChanged { .. }         => "settings_changed",
        GameEvent::CatalogDiscovered { .. }       => "catalog_discovered",
        GameEvent::MilestoneReached { .. }        => "milestone_reached",
        GameEvent::CareerLevelUp { .. }           => "career_level_up",
        GameEvent::EventPhaseChanged { .. }       => "event_phase_changed",
        GameEvent::AchievementUnlocked { .. }     => "achievement_unlocked",
        GameEvent::GameReset { .. }               => "game_reset",
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub profile_id: ProfileId,
    pub at_ms:      EpochMs,
    pub subsystem:  String,
    pub event_type: String,
    pub payload:    String, // JSON-serialized GameEvent
}
