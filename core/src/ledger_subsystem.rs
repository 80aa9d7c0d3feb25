//! Progression ledger: everything the player can buy, what it costs,
//! and whether it is unlocked yet.
//!
//! RULE: A purchase is atomic. The debit and the owned-count increment
//! are applied to a clone that is only returned on success; a declined
//! purchase hands back nothing and the caller keeps its state.

use crate::{
    catalog_subsystem::{self, Discovery},
    config::{GameConfig, UnlockRule},
    error::{ActionResult, Decline},
    state::GameState,
    types::{Bps, EpochMs},
};

/// What a purchase is paid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Currency,
    Parts,
    Heritage,
    Reputation,
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Currency   => "currency",
            Self::Parts      => "crafting parts",
            Self::Heritage   => "heritage",
            Self::Reputation => "reputation",
        }
    }

    pub fn balance(&self, state: &GameState) -> u64 {
        match self {
            Self::Currency   => state.currency_cents,
            Self::Parts      => state.crafting_parts,
            Self::Heritage   => state.maison.heritage,
            Self::Reputation => state.maison.reputation,
        }
    }

    fn debit(&self, state: &mut GameState, amount: u64) {
        let balance = match self {
            Self::Currency   => &mut state.currency_cents,
            Self::Parts      => &mut state.crafting_parts,
            Self::Heritage   => &mut state.maison.heritage,
            Self::Reputation => &mut state.maison.reputation,
        };
        *balance -= amount;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub resource: Resource,
    pub amount:   u64,
}

/// Which ledger an entity id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Item,
    Upgrade,
    WorkshopTier,
    WorkshopUpgrade,
    Boost,
    MaisonLine,
    MaisonUpgrade,
}

pub fn kind_of(config: &GameConfig, entity_id: &str) -> Option<EntityKind> {
    if config.item(entity_id).is_some() {
        Some(EntityKind::Item)
    } else if config.upgrade(entity_id).is_some() {
        Some(EntityKind::Upgrade)
    } else if config.workshop_tier(entity_id).is_some() {
        Some(EntityKind::WorkshopTier)
    } else if config.workshop_upgrade(entity_id).is_some() {
        Some(EntityKind::WorkshopUpgrade)
    } else if config.boost(entity_id).is_some() {
        Some(EntityKind::Boost)
    } else if config.maison_line(entity_id).is_some() {
        Some(EntityKind::MaisonLine)
    } else if config.maison_upgrade(entity_id).is_some() {
        Some(EntityKind::MaisonUpgrade)
    } else {
        None
    }
}

/// `base * growth^owned`, rounding up each step. Strictly increasing in
/// `owned` for any growth above 1.0x; saturates at u64::MAX.
pub fn geometric_cost(base: u64, growth_bps: Bps, owned: u32) -> u64 {
    let growth = u128::from(growth_bps);
    let one = u128::from(crate::types::BPS_ONE);
    let mut cost = u128::from(base.max(1));
    for _ in 0..owned {
        let next = (cost * growth).div_ceil(one);
        cost = next.max(cost + 1);
        if cost >= u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    cost as u64
}

/// Price of the next unit of `entity_id` when `owned` are already held.
pub fn cost_of(config: &GameConfig, entity_id: &str, owned: u32) -> Option<Price> {
    use Resource::*;
    let price = match kind_of(config, entity_id)? {
        EntityKind::Item => {
            let c = config.item(entity_id)?;
            Price { resource: Currency, amount: geometric_cost(c.base_cost_cents, c.cost_growth_bps, owned) }
        }
        EntityKind::Upgrade => {
            let c = config.upgrade(entity_id)?;
            Price { resource: Currency, amount: geometric_cost(c.base_cost_cents, c.cost_growth_bps, owned) }
        }
        EntityKind::WorkshopTier => {
            let c = config.workshop_tier(entity_id)?;
            Price { resource: Currency, amount: geometric_cost(c.base_cost_cents, c.cost_growth_bps, owned) }
        }
        EntityKind::WorkshopUpgrade => {
            Price { resource: Currency, amount: config.workshop_upgrade(entity_id)?.cost_cents }
        }
        EntityKind::Boost => {
            let c = config.boost(entity_id)?;
            Price { resource: Parts, amount: geometric_cost(c.base_parts_cost, c.cost_growth_bps, owned) }
        }
        EntityKind::MaisonLine => {
            Price { resource: Heritage, amount: config.maison_line(entity_id)?.heritage_cost }
        }
        EntityKind::MaisonUpgrade => {
            Price { resource: Reputation, amount: config.maison_upgrade(entity_id)?.reputation_cost }
        }
    };
    Some(price)
}

/// How many of `entity_id` the state holds (levels for upgrades,
/// 0/1 for boolean entities).
pub fn owned_count(config: &GameConfig, state: &GameState, entity_id: &str) -> u32 {
    match kind_of(config, entity_id) {
        Some(EntityKind::Item)            => state.owned(entity_id),
        Some(EntityKind::Upgrade)         => state.upgrade_level(entity_id),
        Some(EntityKind::WorkshopTier)    => state.workshop.tiers.get(entity_id).copied().unwrap_or(0),
        Some(EntityKind::WorkshopUpgrade) => u32::from(state.workshop.upgrades.contains(entity_id)),
        Some(EntityKind::Boost)           => state.crafted_boosts.get(entity_id).copied().unwrap_or(0),
        Some(EntityKind::MaisonLine)      => u32::from(state.maison.lines.contains(entity_id)),
        Some(EntityKind::MaisonUpgrade)   => u32::from(state.maison.upgrades.contains(entity_id)),
        None => 0,
    }
}

/// The ceiling on `owned_count` for this entity, if any.
fn max_count(config: &GameConfig, entity_id: &str) -> Option<u32> {
    match kind_of(config, entity_id)? {
        EntityKind::Item | EntityKind::WorkshopTier => None,
        EntityKind::Upgrade => config.upgrade(entity_id).map(|u| u.max_level),
        EntityKind::Boost   => config.boost(entity_id).map(|b| b.max_count),
        EntityKind::WorkshopUpgrade | EntityKind::MaisonLine | EntityKind::MaisonUpgrade => Some(1),
    }
}

pub fn rule_satisfied(state: &GameState, rule: &UnlockRule) -> bool {
    if let Some(unlock) = &rule.nostalgia_unlock {
        if state.has_nostalgia_unlock(unlock) {
            return true;
        }
    }
    let milestone_ok = rule
        .milestone
        .as_ref()
        .map(|m| state.milestones.contains(m))
        .unwrap_or(true);
    let requirement_ok = rule
        .requires
        .as_ref()
        .map(|r| state.count_of(&r.entity_id) >= r.count)
        .unwrap_or(true);
    milestone_ok && requirement_ok
}

pub fn is_unlocked(config: &GameConfig, state: &GameState, entity_id: &str) -> bool {
    match kind_of(config, entity_id) {
        Some(EntityKind::Item) => config
            .item(entity_id)
            .map(|c| rule_satisfied(state, &c.unlock))
            .unwrap_or(false),
        Some(EntityKind::Upgrade) => config
            .upgrade(entity_id)
            .map(|c| rule_satisfied(state, &c.unlock))
            .unwrap_or(false),
        Some(EntityKind::WorkshopTier) => config
            .workshop_tier(entity_id)
            .map(|c| rule_satisfied(state, &c.unlock))
            .unwrap_or(false),
        Some(EntityKind::WorkshopUpgrade) => config
            .workshop_upgrade(entity_id)
            .map(|c| rule_satisfied(state, &c.unlock))
            .unwrap_or(false),
        // Crafting opens once the workshop has any tier.
        Some(EntityKind::Boost) => state.workshop.tiers.values().any(|&n| n > 0),
        // The maison opens after the first prestige.
        Some(EntityKind::MaisonLine) => state.nostalgia_resets > 0,
        Some(EntityKind::MaisonUpgrade) => !state.maison.lines.is_empty(),
        None => false,
    }
}

pub fn can_afford(config: &GameConfig, state: &GameState, entity_id: &str) -> bool {
    let owned = owned_count(config, state, entity_id);
    cost_of(config, entity_id, owned)
        .map(|p| p.resource.balance(state) >= p.amount)
        .unwrap_or(false)
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub state:     GameState,
    pub price:     Price,
    pub discovery: Option<Discovery>,
}

/// Buy one unit/level of `entity_id`.
pub fn purchase(
    config: &GameConfig,
    state: &GameState,
    entity_id: &str,
    now: EpochMs,
) -> ActionResult<Receipt> {
    let kind = kind_of(config, entity_id)
        .ok_or_else(|| Decline::UnknownEntity { entity_id: entity_id.to_string() })?;

    if !is_unlocked(config, state, entity_id) {
        return Err(Decline::LockedEntity { entity_id: entity_id.to_string() });
    }

    let owned = owned_count(config, state, entity_id);
    if let Some(max) = max_count(config, entity_id) {
        if owned >= max {
            return Err(if max == 1 {
                Decline::AlreadyOwned { entity_id: entity_id.to_string() }
            } else {
                Decline::MaxLevel { entity_id: entity_id.to_string() }
            });
        }
    }

    let price = cost_of(config, entity_id, owned)
        .ok_or_else(|| Decline::UnknownEntity { entity_id: entity_id.to_string() })?;
    let available = price.resource.balance(state);
    if available < price.amount {
        return Err(Decline::InsufficientFunds {
            resource: price.resource.name(),
            needed: price.amount,
            available,
        });
    }

    let mut next = state.clone();
    price.resource.debit(&mut next, price.amount);

    let id = entity_id.to_string();
    let mut discovery = None;
    match kind {
        EntityKind::Item => {
            *next.items.entry(id).or_insert(0) += 1;
            discovery = catalog_subsystem::roll_on_purchase(config, &mut next, entity_id);
        }
        EntityKind::Upgrade => {
            *next.upgrades.entry(id).or_insert(0) += 1;
        }
        EntityKind::WorkshopTier => {
            *next.workshop.tiers.entry(id).or_insert(0) += 1;
        }
        EntityKind::WorkshopUpgrade => {
            next.workshop.upgrades.insert(id);
        }
        EntityKind::Boost => {
            *next.crafted_boosts.entry(id).or_insert(0) += 1;
        }
        EntityKind::MaisonLine => {
            next.maison.lines.insert(id);
        }
        EntityKind::MaisonUpgrade => {
            next.maison.upgrades.insert(id);
        }
    }

    log::debug!(
        "now={now} ledger: bought {entity_id} for {} {} (owned {} -> {})",
        price.amount,
        price.resource.name(),
        owned,
        owned + 1
    );

    Ok(Receipt { state: next, price, discovery })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_cost_base_case() {
        assert_eq!(geometric_cost(1_000, 11_500, 0), 1_000);
        assert_eq!(geometric_cost(1_000, 11_500, 1), 1_150);
        assert_eq!(geometric_cost(1_000, 11_500, 2), 1_323);
    }

    #[test]
    fn geometric_cost_strictly_increases() {
        let mut prev = 0;
        for owned in 0..200 {
            let cost = geometric_cost(1, 10_001, owned);
            assert!(cost > prev, "cost did not increase at {owned}: {cost} <= {prev}");
            prev = cost;
        }
    }

    #[test]
    fn geometric_cost_saturates() {
        assert_eq!(geometric_cost(u64::MAX / 2, 30_000, 10), u64::MAX);
    }
}
