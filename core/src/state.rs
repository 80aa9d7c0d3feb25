//! The root aggregate: everything a player's save carries.
//!
//! Maps and sets are ordered (`BTreeMap`/`BTreeSet`) so serialization is
//! canonical and two equal states always produce byte-identical blobs.

use crate::types::{Cents, EntityId, EpochMs};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    pub currency_cents:  Cents,
    pub enjoyment_cents: Cents,

    /// Currency earned since the last prestige. Milestones key off this.
    pub run_earned_cents:         Cents,
    pub lifetime_earned_cents:    Cents,
    pub lifetime_enjoyment_cents: Cents,

    // ── Nostalgia (prestige-scoped) ───────────────
    pub nostalgia_points: u64,
    pub nostalgia_resets: u32,
    /// Enjoyment earned since the last prestige; feeds the points formula.
    pub nostalgia_enjoyment_earned_cents: Cents,
    pub nostalgia_last_gain: u64,
    pub nostalgia_last_prestiged_at_ms: Option<EpochMs>,
    pub nostalgia_unlocks: BTreeMap<EntityId, NostalgiaPurchase>,

    pub therapist_career: TherapistCareer,

    // ── Run-scoped vault ─────────────────────────
    pub items:      BTreeMap<EntityId, u32>,
    pub upgrades:   BTreeMap<EntityId, u32>,
    pub milestones: BTreeSet<EntityId>,

    pub workshop:        WorkshopState,
    pub crafting_parts:  u64,
    pub crafted_boosts:  BTreeMap<EntityId, u32>,

    pub maison: MaisonState,

    pub achievements: BTreeSet<EntityId>,
    pub events:       BTreeMap<EntityId, EventWindow>,
    pub catalog:      CatalogState,

    pub accrual: AccrualRemainders,

    /// Simulation cursor. Persisted as the envelope's `lastSimulatedAtMs`.
    #[serde(skip)]
    pub simulated_at_ms: EpochMs,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            currency_cents: 0,
            enjoyment_cents: 0,
            run_earned_cents: 0,
            lifetime_earned_cents: 0,
            lifetime_enjoyment_cents: 0,
            nostalgia_points: 0,
            nostalgia_resets: 0,
            nostalgia_enjoyment_earned_cents: 0,
            nostalgia_last_gain: 0,
            nostalgia_last_prestiged_at_ms: None,
            nostalgia_unlocks: BTreeMap::new(),
            therapist_career: TherapistCareer::default(),
            items: BTreeMap::new(),
            upgrades: BTreeMap::new(),
            milestones: BTreeSet::new(),
            workshop: WorkshopState::default(),
            crafting_parts: 0,
            crafted_boosts: BTreeMap::new(),
            maison: MaisonState::default(),
            achievements: BTreeSet::new(),
            events: BTreeMap::new(),
            catalog: CatalogState::default(),
            accrual: AccrualRemainders::default(),
            simulated_at_ms: 0,
        }
    }
}

impl GameState {
    /// A brand-new game started at `now`.
    pub fn fresh(now: EpochMs) -> Self {
        Self {
            simulated_at_ms: now,
            catalog: CatalogState { seed: now, ..CatalogState::default() },
            ..Self::default()
        }
    }

    pub fn owned(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn upgrade_level(&self, upgrade_id: &str) -> u32 {
        self.upgrades.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.items.values().sum()
    }

    pub fn has_nostalgia_unlock(&self, unlock_id: &str) -> bool {
        self.nostalgia_unlocks.contains_key(unlock_id)
    }

    /// Owned count of any countable entity: items, workshop tiers,
    /// crafted boosts or upgrade levels, in that lookup order.
    pub fn count_of(&self, entity_id: &str) -> u32 {
        self.items
            .get(entity_id)
            .or_else(|| self.workshop.tiers.get(entity_id))
            .or_else(|| self.crafted_boosts.get(entity_id))
            .or_else(|| self.upgrades.get(entity_id))
            .copied()
            .unwrap_or(0)
    }

    /// Credit earned currency to the balance and every earned counter.
    pub fn credit_currency(&mut self, cents: Cents) {
        self.currency_cents = self.currency_cents.saturating_add(cents);
        self.run_earned_cents = self.run_earned_cents.saturating_add(cents);
        self.lifetime_earned_cents = self.lifetime_earned_cents.saturating_add(cents);
    }

    pub fn credit_enjoyment(&mut self, cents: Cents) {
        self.enjoyment_cents = self.enjoyment_cents.saturating_add(cents);
        self.lifetime_enjoyment_cents = self.lifetime_enjoyment_cents.saturating_add(cents);
        self.nostalgia_enjoyment_earned_cents =
            self.nostalgia_enjoyment_earned_cents.saturating_add(cents);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NostalgiaPurchase {
    pub cost_points: u64,
    /// `nostalgiaResets` at the time of purchase.
    pub cycle: u32,
    pub purchased_at_ms: EpochMs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TherapistCareer {
    pub level: u32,
    /// Progress towards the next level.
    pub xp: u64,
    pub cooldown_until_ms: EpochMs,
    pub sessions: u32,
}

impl Default for TherapistCareer {
    fn default() -> Self {
        Self { level: 1, xp: 0, cooldown_until_ms: 0, sessions: 0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkshopState {
    pub tiers:    BTreeMap<EntityId, u32>,
    pub upgrades: BTreeSet<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaisonState {
    pub heritage:   u64,
    pub reputation: u64,
    pub upgrades:   BTreeSet<EntityId>,
    pub lines:      BTreeSet<EntityId>,
}

/// Phase of a limited event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    #[default]
    Dormant,
    Active,
    Cooldown,
}

impl EventPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dormant  => "dormant",
            Self::Active   => "active",
            Self::Cooldown => "cooldown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventWindow {
    pub active_until_ms:      EpochMs,
    pub next_available_at_ms: EpochMs,
    pub phase:                EventPhase,
    pub completions:          u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogState {
    pub discovered: BTreeSet<EntityId>,
    pub tiers:      BTreeSet<EntityId>,
    /// Seed for the discovery stream; fixed when the game is created.
    pub seed:  u64,
    /// Number of discovery rolls drawn so far.
    pub rolls: u64,
}

/// Sub-unit accrual carried between simulation steps, in micro-units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccrualRemainders {
    pub currency:   u64,
    pub enjoyment:  u64,
    pub xp:         u64,
    pub parts:      u64,
    pub reputation: u64,
}
