//! Economy configuration: every catalogued entity and tuning constant.
//!
//! `GameConfig::builtin()` is the shipped economy. `GameConfig::load()`
//! reads the same shape from `{data_dir}/economy.json` so balance passes
//! can happen without a rebuild.

use crate::types::{Bps, Cents, EntityId};
use serde::{Deserialize, Serialize};

// ── Shared effect model ───────────────────────────────────────────

/// A production modifier. Values are basis points added on top of 1.0x,
/// applied once per owned level/count (or once, for boolean sources).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Currency  { bps: Bps },
    Enjoyment { bps: Bps },
    Item      { item: EntityId, bps: Bps },
    Xp        { bps: Bps },
    Parts     { bps: Bps },
}

/// Gating for anything purchasable. An empty rule means always unlocked.
/// A matching nostalgia unlock bypasses the other requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRule {
    #[serde(default)]
    pub milestone: Option<EntityId>,
    #[serde(default)]
    pub requires: Option<Requirement>,
    #[serde(default)]
    pub nostalgia_unlock: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub entity_id: EntityId,
    pub count:     u32,
}

// ── Vault: items and upgrades ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub id: EntityId,
    pub label: String,
    pub base_cost_cents: Cents,
    pub cost_growth_bps: Bps,
    /// Milli-cents per second, per owned unit.
    pub currency_rate: u64,
    /// Milli-cents of enjoyment per second, per owned unit.
    pub enjoyment_rate: u64,
    /// Chance per purchase to discover a catalog entry.
    pub catalog_discovery_bps: Bps,
    #[serde(default)]
    pub unlock: UnlockRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    pub id: EntityId,
    pub label: String,
    pub base_cost_cents: Cents,
    pub cost_growth_bps: Bps,
    pub max_level: u32,
    pub effect: Effect,
    #[serde(default)]
    pub unlock: UnlockRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneConfig {
    pub id: EntityId,
    pub label: String,
    /// Currency earned during the current run needed to reach it.
    pub run_earned_cents: Cents,
    pub effect: Effect,
}

// ── Achievements ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementRule {
    LifetimeEarned    { cents: Cents },
    RunEarned         { cents: Cents },
    ItemOwned         { item: EntityId, count: u32 },
    TotalItems        { count: u32 },
    NostalgiaResets   { count: u32 },
    CareerLevel       { level: u32 },
    CatalogDiscovered { count: u32 },
    MaisonLines       { count: u32 },
    EventCompletions  { event: EntityId, count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementConfig {
    pub id: EntityId,
    pub label: String,
    pub rule: AchievementRule,
}

// ── Limited events ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub id: EntityId,
    pub label: String,
    pub duration_ms: u64,
    pub cooldown_ms: u64,
    pub effect: Effect,
    #[serde(default)]
    pub unlock: UnlockRule,
}

// ── Workshop and crafting ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopTierConfig {
    pub id: EntityId,
    pub label: String,
    pub base_cost_cents: Cents,
    pub cost_growth_bps: Bps,
    /// Milli-parts per second, per owned tier.
    pub parts_rate: u64,
    #[serde(default)]
    pub unlock: UnlockRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopUpgradeConfig {
    pub id: EntityId,
    pub label: String,
    pub cost_cents: Cents,
    pub effect: Effect,
    #[serde(default)]
    pub unlock: UnlockRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostConfig {
    pub id: EntityId,
    pub label: String,
    pub base_parts_cost: u64,
    pub cost_growth_bps: Bps,
    pub max_count: u32,
    pub effect: Effect,
}

// ── Maison ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaisonLineConfig {
    pub id: EntityId,
    pub label: String,
    pub heritage_cost: u64,
    /// Milli-reputation per second while the line is open.
    pub reputation_rate: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaisonUpgradeConfig {
    pub id: EntityId,
    pub label: String,
    pub reputation_cost: u64,
    pub effect: Effect,
}

// ── Catalog ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryConfig {
    pub id: EntityId,
    pub label: String,
    pub tier: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTierConfig {
    pub id: EntityId,
    pub label: String,
    /// Discovered entries of this tier needed to unlock it.
    pub required: u32,
    pub effect: Effect,
}

// ── Nostalgia shop and prestige ───────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NostalgiaEffect {
    /// The item is available from the start of every run.
    UnlockItem { item: EntityId },
    Boost { effect: Effect },
    /// Each new run starts with this balance.
    StartingCents { cents: Cents },
    /// Workshop progress survives prestige.
    KeepWorkshop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NostalgiaUnlockConfig {
    pub id: EntityId,
    pub label: String,
    pub cost_points: u64,
    pub effect: NostalgiaEffect,
}

/// Which nostalgia purchases may still be refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundPolicy {
    /// Only purchases made since the most recent prestige.
    CurrentCycle,
    /// Any purchase, regardless of prestiges since.
    Anytime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrestigeConfig {
    /// points = floor(sqrt(enjoyment_earned / points_divisor_cents))
    pub points_divisor_cents: Cents,
    pub heritage_per_point: u64,
    pub keep_workshop: bool,
    pub refund_policy: RefundPolicy,
}

// ── Therapist career ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerConfig {
    /// Milli-xp per second of idle accrual.
    pub xp_rate: u64,
    /// xp to go from level L to L+1 is `base_xp_per_level * L`.
    pub base_xp_per_level: u64,
    pub max_level: u32,
    /// Currency bonus per level above 1.
    pub level_bonus_bps: Bps,
    pub session_cents: Cents,
    pub session_xp: u64,
    pub session_cooldown_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineConfig {
    /// Catch-up is clamped to this many milliseconds; `None` = unbounded.
    #[serde(default)]
    pub max_catch_up_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub items: Vec<ItemConfig>,
    pub upgrades: Vec<UpgradeConfig>,
    pub milestones: Vec<MilestoneConfig>,
    pub achievements: Vec<AchievementConfig>,
    pub events: Vec<EventConfig>,
    pub workshop_tiers: Vec<WorkshopTierConfig>,
    pub workshop_upgrades: Vec<WorkshopUpgradeConfig>,
    pub boosts: Vec<BoostConfig>,
    pub maison_lines: Vec<MaisonLineConfig>,
    pub maison_upgrades: Vec<MaisonUpgradeConfig>,
    pub catalog_entries: Vec<CatalogEntryConfig>,
    pub catalog_tiers: Vec<CatalogTierConfig>,
    pub nostalgia_unlocks: Vec<NostalgiaUnlockConfig>,
    pub prestige: PrestigeConfig,
    pub career: CareerConfig,
    pub offline: OfflineConfig,
}

impl GameConfig {
    /// Load from `{data_dir}/economy.json`.
    /// In tests, use GameConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/economy.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs whose references point at nothing.
    pub fn validate(&self) -> anyhow::Result<()> {
        for item in &self.items {
            if item.cost_growth_bps <= crate::types::BPS_ONE {
                anyhow::bail!("item {} must have cost growth above 1.0x", item.id);
            }
            self.check_rule(&item.id, &item.unlock)?;
        }
        for upgrade in &self.upgrades {
            self.check_rule(&upgrade.id, &upgrade.unlock)?;
        }
        for entry in &self.catalog_entries {
            if !self.catalog_tiers.iter().any(|t| t.id == entry.tier) {
                anyhow::bail!("catalog entry {} names unknown tier {}", entry.id, entry.tier);
            }
        }
        if self.prestige.points_divisor_cents == 0 {
            anyhow::bail!("prestige.points_divisor_cents must be non-zero");
        }
        if self.career.max_level == 0 {
            anyhow::bail!("career.max_level must be at least 1");
        }
        Ok(())
    }

    fn check_rule(&self, owner: &str, rule: &UnlockRule) -> anyhow::Result<()> {
        if let Some(m) = &rule.milestone {
            if self.milestone(m).is_none() {
                anyhow::bail!("{owner} is gated on unknown milestone {m}");
            }
        }
        if let Some(n) = &rule.nostalgia_unlock {
            if self.nostalgia_unlock(n).is_none() {
                anyhow::bail!("{owner} is gated on unknown nostalgia unlock {n}");
            }
        }
        Ok(())
    }

    // ── Lookups ───────────────────────────────────────────────────

    pub fn item(&self, id: &str) -> Option<&ItemConfig> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeConfig> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn milestone(&self, id: &str) -> Option<&MilestoneConfig> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn event(&self, id: &str) -> Option<&EventConfig> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn workshop_tier(&self, id: &str) -> Option<&WorkshopTierConfig> {
        self.workshop_tiers.iter().find(|t| t.id == id)
    }

    pub fn workshop_upgrade(&self, id: &str) -> Option<&WorkshopUpgradeConfig> {
        self.workshop_upgrades.iter().find(|u| u.id == id)
    }

    pub fn boost(&self, id: &str) -> Option<&BoostConfig> {
        self.boosts.iter().find(|b| b.id == id)
    }

    pub fn maison_line(&self, id: &str) -> Option<&MaisonLineConfig> {
        self.maison_lines.iter().find(|l| l.id == id)
    }

    pub fn maison_upgrade(&self, id: &str) -> Option<&MaisonUpgradeConfig> {
        self.maison_upgrades.iter().find(|u| u.id == id)
    }

    pub fn nostalgia_unlock(&self, id: &str) -> Option<&NostalgiaUnlockConfig> {
        self.nostalgia_unlocks.iter().find(|u| u.id == id)
    }

    /// The shipped economy.
    pub fn builtin() -> Self {
        let items = vec![
            ItemConfig {
                id: "starter".into(),
                label: "Starter Watch".into(),
                base_cost_cents: 1_000,
                cost_growth_bps: 11_500,
                currency_rate: 10_000,
                enjoyment_rate: 2_000,
                catalog_discovery_bps: 500,
                unlock: UnlockRule::default(),
            },
            ItemConfig {
                id: "classic".into(),
                label: "Classic Dress Watch".into(),
                base_cost_cents: 50_000,
                cost_growth_bps: 11_500,
                currency_rate: 400_000,
                enjoyment_rate: 80_000,
                catalog_discovery_bps: 1_500,
                unlock: UnlockRule {
                    milestone: Some("apprentice".into()),
                    requires: None,
                    nostalgia_unlock: Some("classic".into()),
                },
            },
            ItemConfig {
                id: "chronograph".into(),
                label: "Chronograph".into(),
                base_cost_cents: 1_000_000,
                cost_growth_bps: 11_500,
                currency_rate: 5_000_000,
                enjoyment_rate: 1_000_000,
                catalog_discovery_bps: 3_000,
                unlock: UnlockRule {
                    milestone: Some("journeyman".into()),
                    requires: None,
                    nostalgia_unlock: Some("chronograph".into()),
                },
            },
            ItemConfig {
                id: "tourbillon".into(),
                label: "Tourbillon".into(),
                base_cost_cents: 25_000_000,
                cost_growth_bps: 11_500,
                currency_rate: 80_000_000,
                enjoyment_rate: 16_000_000,
                catalog_discovery_bps: 6_000,
                unlock: UnlockRule {
                    milestone: Some("master".into()),
                    requires: None,
                    nostalgia_unlock: Some("tourbillon".into()),
                },
            },
        ];

        let upgrades = vec![
            UpgradeConfig {
                id: "polishing-tools".into(),
                label: "Polishing Tools".into(),
                base_cost_cents: 5_000,
                cost_growth_bps: 20_000,
                max_level: 10,
                effect: Effect::Currency { bps: 500 },
                unlock: UnlockRule::default(),
            },
            UpgradeConfig {
                id: "assembly-jigs".into(),
                label: "Assembly Jigs".into(),
                base_cost_cents: 20_000,
                cost_growth_bps: 25_000,
                max_level: 10,
                effect: Effect::Item { item: "starter".into(), bps: 2_500 },
                unlock: UnlockRule {
                    milestone: None,
                    requires: Some(Requirement { entity_id: "starter".into(), count: 5 }),
                    nostalgia_unlock: None,
                },
            },
            UpgradeConfig {
                id: "velvet-trays".into(),
                label: "Velvet Display Trays".into(),
                base_cost_cents: 100_000,
                cost_growth_bps: 20_000,
                max_level: 5,
                effect: Effect::Enjoyment { bps: 1_500 },
                unlock: UnlockRule {
                    milestone: Some("apprentice".into()),
                    requires: None,
                    nostalgia_unlock: None,
                },
            },
            UpgradeConfig {
                id: "master-loupe".into(),
                label: "Master's Loupe".into(),
                base_cost_cents: 2_500_000,
                cost_growth_bps: 30_000,
                max_level: 5,
                effect: Effect::Xp { bps: 2_000 },
                unlock: UnlockRule {
                    milestone: Some("journeyman".into()),
                    requires: None,
                    nostalgia_unlock: None,
                },
            },
        ];

        let milestones = vec![
            MilestoneConfig {
                id: "apprentice".into(),
                label: "Apprentice".into(),
                run_earned_cents: 50_000,
                effect: Effect::Currency { bps: 1_000 },
            },
            MilestoneConfig {
                id: "journeyman".into(),
                label: "Journeyman".into(),
                run_earned_cents: 2_000_000,
                effect: Effect::Currency { bps: 2_500 },
            },
            MilestoneConfig {
                id: "master".into(),
                label: "Master Watchmaker".into(),
                run_earned_cents: 60_000_000,
                effect: Effect::Enjoyment { bps: 5_000 },
            },
            MilestoneConfig {
                id: "grand-master".into(),
                label: "Grand Master".into(),
                run_earned_cents: 1_000_000_000,
                effect: Effect::Currency { bps: 5_000 },
            },
        ];

        let achievements = vec![
            achievement("first-dollar", "First Dollar", AchievementRule::LifetimeEarned { cents: 100 }),
            achievement("thousandaire", "Thousandaire", AchievementRule::LifetimeEarned { cents: 100_000 }),
            achievement("collector", "Collector", AchievementRule::TotalItems { count: 25 }),
            achievement(
                "starter-shelf",
                "A Shelf of Starters",
                AchievementRule::ItemOwned { item: "starter".into(), count: 10 },
            ),
            achievement("first-nostalgia", "Fond Memories", AchievementRule::NostalgiaResets { count: 1 }),
            achievement("seasoned-therapist", "Seasoned Therapist", AchievementRule::CareerLevel { level: 5 }),
            achievement("archivist", "Archivist", AchievementRule::CatalogDiscovered { count: 5 }),
            achievement("maison-founder", "Maison Founder", AchievementRule::MaisonLines { count: 1 }),
            achievement(
                "auction-regular",
                "Auction Regular",
                AchievementRule::EventCompletions { event: "auction-weekend".into(), count: 3 },
            ),
        ];

        let events = vec![EventConfig {
            id: "auction-weekend".into(),
            label: "Auction Weekend".into(),
            duration_ms: 30 * 60 * 1_000,
            cooldown_ms: 4 * 60 * 60 * 1_000,
            effect: Effect::Currency { bps: 5_000 },
            unlock: UnlockRule {
                milestone: Some("apprentice".into()),
                requires: None,
                nostalgia_unlock: None,
            },
        }];

        let workshop_tiers = vec![
            WorkshopTierConfig {
                id: "bench".into(),
                label: "Watchmaker's Bench".into(),
                base_cost_cents: 200_000,
                cost_growth_bps: 11_500,
                parts_rate: 200,
                unlock: UnlockRule {
                    milestone: Some("journeyman".into()),
                    requires: None,
                    nostalgia_unlock: None,
                },
            },
            WorkshopTierConfig {
                id: "lathe".into(),
                label: "Lathe".into(),
                base_cost_cents: 5_000_000,
                cost_growth_bps: 12_000,
                parts_rate: 2_000,
                unlock: UnlockRule {
                    milestone: None,
                    requires: Some(Requirement { entity_id: "bench".into(), count: 3 }),
                    nostalgia_unlock: None,
                },
            },
        ];

        let workshop_upgrades = vec![
            WorkshopUpgradeConfig {
                id: "precision-lathe".into(),
                label: "Precision Lathe".into(),
                cost_cents: 1_000_000,
                effect: Effect::Parts { bps: 10_000 },
                unlock: UnlockRule {
                    milestone: None,
                    requires: Some(Requirement { entity_id: "bench".into(), count: 1 }),
                    nostalgia_unlock: None,
                },
            },
            WorkshopUpgradeConfig {
                id: "apprentice-rota".into(),
                label: "Apprentice Rota".into(),
                cost_cents: 3_000_000,
                effect: Effect::Currency { bps: 1_500 },
                unlock: UnlockRule {
                    milestone: None,
                    requires: Some(Requirement { entity_id: "bench".into(), count: 1 }),
                    nostalgia_unlock: None,
                },
            },
        ];

        let boosts = vec![
            BoostConfig {
                id: "mainspring-tune".into(),
                label: "Mainspring Tune-up".into(),
                base_parts_cost: 50,
                cost_growth_bps: 15_000,
                max_count: 10,
                effect: Effect::Currency { bps: 300 },
            },
            BoostConfig {
                id: "crystal-polish".into(),
                label: "Crystal Polish".into(),
                base_parts_cost: 120,
                cost_growth_bps: 15_000,
                max_count: 10,
                effect: Effect::Enjoyment { bps: 500 },
            },
        ];

        let maison_lines = vec![
            MaisonLineConfig {
                id: "heritage-collection".into(),
                label: "Heritage Collection".into(),
                heritage_cost: 1,
                reputation_rate: 500,
            },
            MaisonLineConfig {
                id: "haute-horlogerie".into(),
                label: "Haute Horlogerie".into(),
                heritage_cost: 5,
                reputation_rate: 3_000,
            },
        ];

        let maison_upgrades = vec![
            MaisonUpgradeConfig {
                id: "atelier-signature".into(),
                label: "Atelier Signature".into(),
                reputation_cost: 100,
                effect: Effect::Currency { bps: 2_000 },
            },
            MaisonUpgradeConfig {
                id: "museum-wing".into(),
                label: "Museum Wing".into(),
                reputation_cost: 1_000,
                effect: Effect::Enjoyment { bps: 3_000 },
            },
        ];

        let catalog_entries = vec![
            catalog_entry("ref-1931", "Reverso 1931", "vintage"),
            catalog_entry("ref-1945", "Datejust 1945", "vintage"),
            catalog_entry("ref-1953", "Submariner 1953", "vintage"),
            catalog_entry("ref-1969", "Speedmaster 1969", "modern"),
            catalog_entry("ref-1972", "Royal Oak 1972", "modern"),
            catalog_entry("ref-1976", "Nautilus 1976", "modern"),
            catalog_entry("ref-1505", "Pocket Chronometer", "grail"),
            catalog_entry("ref-1933", "Supercomplication", "grail"),
        ];

        let catalog_tiers = vec![
            CatalogTierConfig {
                id: "vintage".into(),
                label: "Vintage".into(),
                required: 3,
                effect: Effect::Currency { bps: 1_000 },
            },
            CatalogTierConfig {
                id: "modern".into(),
                label: "Modern Icons".into(),
                required: 3,
                effect: Effect::Enjoyment { bps: 1_000 },
            },
            CatalogTierConfig {
                id: "grail".into(),
                label: "Grails".into(),
                required: 2,
                effect: Effect::Currency { bps: 3_000 },
            },
        ];

        let nostalgia_unlocks = vec![
            NostalgiaUnlockConfig {
                id: "classic".into(),
                label: "Remember the Classic".into(),
                cost_points: 1,
                effect: NostalgiaEffect::UnlockItem { item: "classic".into() },
            },
            NostalgiaUnlockConfig {
                id: "chronograph".into(),
                label: "Remember the Chronograph".into(),
                cost_points: 3,
                effect: NostalgiaEffect::UnlockItem { item: "chronograph".into() },
            },
            NostalgiaUnlockConfig {
                id: "tourbillon".into(),
                label: "Remember the Tourbillon".into(),
                cost_points: 8,
                effect: NostalgiaEffect::UnlockItem { item: "tourbillon".into() },
            },
            NostalgiaUnlockConfig {
                id: "golden-memories".into(),
                label: "Golden Memories".into(),
                cost_points: 2,
                effect: NostalgiaEffect::Boost { effect: Effect::Currency { bps: 2_500 } },
            },
            NostalgiaUnlockConfig {
                id: "head-start".into(),
                label: "Head Start".into(),
                cost_points: 2,
                effect: NostalgiaEffect::StartingCents { cents: 100_000 },
            },
            NostalgiaUnlockConfig {
                id: "heirloom-bench".into(),
                label: "Heirloom Bench".into(),
                cost_points: 5,
                effect: NostalgiaEffect::KeepWorkshop,
            },
        ];

        Self {
            items,
            upgrades,
            milestones,
            achievements,
            events,
            workshop_tiers,
            workshop_upgrades,
            boosts,
            maison_lines,
            maison_upgrades,
            catalog_entries,
            catalog_tiers,
            nostalgia_unlocks,
            prestige: PrestigeConfig {
                points_divisor_cents: 1_000_000,
                heritage_per_point: 1,
                keep_workshop: false,
                refund_policy: RefundPolicy::CurrentCycle,
            },
            career: CareerConfig {
                xp_rate: 1_000,
                base_xp_per_level: 100,
                max_level: 50,
                level_bonus_bps: 200,
                session_cents: 2_500,
                session_xp: 25,
                session_cooldown_ms: 10 * 60 * 1_000,
            },
            offline: OfflineConfig {
                max_catch_up_ms: Some(7 * 24 * 60 * 60 * 1_000),
            },
        }
    }
}

fn achievement(id: &str, label: &str, rule: AchievementRule) -> AchievementConfig {
    AchievementConfig { id: id.into(), label: label.into(), rule }
}

fn catalog_entry(id: &str, label: &str, tier: &str) -> CatalogEntryConfig {
    CatalogEntryConfig { id: id.into(), label: label.into(), tier: tier.into() }
}
