use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdleError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save version {found} is newer than this build supports ({supported})")]
    UnknownSaveVersion { found: u64, supported: u64 },

    #[error("Malformed save: {reason}")]
    MalformedSave { reason: String },

    #[error("Profile '{profile_id}' not found")]
    ProfileNotFound { profile_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type IdleResult<T> = Result<T, IdleError>;

/// A player action the core refused. The state is left untouched;
/// the UI shows these as disabled controls, not as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Decline {
    #[error("Not enough {resource}: need {needed}, have {available}")]
    InsufficientFunds {
        resource:  &'static str,
        needed:    u64,
        available: u64,
    },

    #[error("'{entity_id}' is locked")]
    LockedEntity { entity_id: String },

    #[error("Unknown entity '{entity_id}'")]
    UnknownEntity { entity_id: String },

    #[error("'{entity_id}' is already at max level")]
    MaxLevel { entity_id: String },

    #[error("'{entity_id}' is already owned")]
    AlreadyOwned { entity_id: String },

    #[error("Refund of '{unlock_id}' is not allowed")]
    IneligibleRefund { unlock_id: String },

    #[error("Event '{event_id}' is not dormant")]
    EventNotDormant { event_id: String },

    #[error("Career session on cooldown until {until_ms}")]
    OnCooldown { until_ms: u64 },

    #[error("No prestige is awaiting confirmation")]
    NoPendingPrestige,
}

impl Decline {
    /// Stable snake_case kind, used in the event log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::LockedEntity { .. }      => "locked_entity",
            Self::UnknownEntity { .. }     => "unknown_entity",
            Self::MaxLevel { .. }          => "max_level",
            Self::AlreadyOwned { .. }      => "already_owned",
            Self::IneligibleRefund { .. }  => "ineligible_refund",
            Self::EventNotDormant { .. }   => "event_not_dormant",
            Self::OnCooldown { .. }        => "on_cooldown",
            Self::NoPendingPrestige        => "no_pending_prestige",
        }
    }
}

pub type ActionResult<T> = Result<T, Decline>;
