use crate::{settings::Tab, types::EntityId};
use serde::{Deserialize, Serialize};

/// All player-issued commands.
/// Variants are append-only. Never remove or reorder them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Ledger ────────────────────────────────────
    Purchase { entity_id: EntityId },

    // ── Career / events ───────────────────────────
    TakeSession,
    StartEvent { event_id: EntityId },

    // ── Nostalgia ─────────────────────────────────
    RequestPrestige {
        #[serde(default)]
        skip_confirmation: bool,
    },
    ConfirmPrestige,
    CancelPrestige,
    BuyNostalgiaUnlock { unlock_id: EntityId },
    RefundNostalgiaUnlock { unlock_id: EntityId },

    // ── Settings ──────────────────────────────────
    CycleTheme,
    SetHideCompletedAchievements { hide: bool },
    HideTab { tab: Tab },
    ShowTab { tab: Tab },
    DismissCoachmark { coachmark_id: String },

    // ── Save ──────────────────────────────────────
    /// Wipe all progress, lifetime totals included. Settings survive.
    ResetGame,
}

impl PlayerCommand {
    /// Stable snake_case name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Purchase { .. }                     => "purchase",
            Self::TakeSession                         => "take_session",
            Self::StartEvent { .. }                   => "start_event",
            Self::RequestPrestige { .. }              => "request_prestige",
            Self::ConfirmPrestige                     => "confirm_prestige",
            Self::CancelPrestige                      => "cancel_prestige",
            Self::BuyNostalgiaUnlock { .. }           => "buy_nostalgia_unlock",
            Self::RefundNostalgiaUnlock { .. }        => "refund_nostalgia_unlock",
            Self::CycleTheme                          => "cycle_theme",
            Self::SetHideCompletedAchievements { .. } => "set_hide_completed_achievements",
            Self::HideTab { .. }                      => "hide_tab",
            Self::ShowTab { .. }                      => "show_tab",
            Self::DismissCoachmark { .. }             => "dismiss_coachmark",
            Self::ResetGame                           => "reset_game",
        }
    }

    /// Settings commands never touch the game state.
    pub fn is_settings(&self) -> bool {
        matches!(
            self,
            Self::CycleTheme
                | Self::SetHideCompletedAchievements { .. }
                | Self::HideTab { .. }
                | Self::ShowTab { .. }
                | Self::DismissCoachmark { .. }
        )
    }
}
