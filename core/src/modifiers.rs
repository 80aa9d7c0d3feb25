//! Production modifiers and the per-second rates they produce.
//!
//! Every bonus source contributes additive basis points on top of 1.0x.
//! Rates are recomputed from scratch whenever the simulation crosses a
//! threshold; they are never cached across a state change.

use crate::{
    config::{Effect, GameConfig, NostalgiaEffect},
    scheduler_subsystem,
    state::GameState,
    types::{Bps, EpochMs, BPS_ONE},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub currency_bps:  Bps,
    pub enjoyment_bps: Bps,
    pub xp_bps:        Bps,
    pub parts_bps:     Bps,
    pub item_bps:      BTreeMap<String, Bps>,
}

impl Modifiers {
    fn add(&mut self, effect: &Effect, times: u64) {
        match effect {
            Effect::Currency { bps }  => self.currency_bps += bps.saturating_mul(times),
            Effect::Enjoyment { bps } => self.enjoyment_bps += bps.saturating_mul(times),
            Effect::Xp { bps }        => self.xp_bps += bps.saturating_mul(times),
            Effect::Parts { bps }     => self.parts_bps += bps.saturating_mul(times),
            Effect::Item { item, bps } => {
                *self.item_bps.entry(item.clone()).or_insert(0) += bps.saturating_mul(times);
            }
        }
    }

    /// Gather every active bonus for `state` at instant `now`.
    pub fn collect(config: &GameConfig, state: &GameState, now: EpochMs) -> Self {
        let mut m = Self::default();

        for upgrade in &config.upgrades {
            let level = state.upgrade_level(&upgrade.id);
            if level > 0 {
                m.add(&upgrade.effect, u64::from(level));
            }
        }
        for milestone in &config.milestones {
            if state.milestones.contains(&milestone.id) {
                m.add(&milestone.effect, 1);
            }
        }
        for upgrade in &config.workshop_upgrades {
            if state.workshop.upgrades.contains(&upgrade.id) {
                m.add(&upgrade.effect, 1);
            }
        }
        for boost in &config.boosts {
            let count = state.crafted_boosts.get(&boost.id).copied().unwrap_or(0);
            if count > 0 {
                m.add(&boost.effect, u64::from(count));
            }
        }
        for upgrade in &config.maison_upgrades {
            if state.maison.upgrades.contains(&upgrade.id) {
                m.add(&upgrade.effect, 1);
            }
        }
        for tier in &config.catalog_tiers {
            if state.catalog.tiers.contains(&tier.id) {
                m.add(&tier.effect, 1);
            }
        }
        for unlock in &config.nostalgia_unlocks {
            if let NostalgiaEffect::Boost { effect } = &unlock.effect {
                if state.has_nostalgia_unlock(&unlock.id) {
                    m.add(effect, 1);
                }
            }
        }
        for event in &config.events {
            if let Some(window) = state.events.get(&event.id) {
                if scheduler_subsystem::is_active(window, now) {
                    m.add(&event.effect, 1);
                }
            }
        }

        let levels_above_one = u64::from(state.therapist_career.level.saturating_sub(1));
        m.currency_bps += config.career.level_bonus_bps.saturating_mul(levels_above_one);

        m
    }
}

/// Production in milli-units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rates {
    pub currency:   u64,
    pub enjoyment:  u64,
    pub xp:         u64,
    pub parts:      u64,
    pub reputation: u64,
}

/// `base * (1.0 + bps)`, saturating.
pub fn scale(base: u64, bonus_bps: Bps) -> u64 {
    let scaled = u128::from(base) * u128::from(BPS_ONE + bonus_bps) / u128::from(BPS_ONE);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub fn rates(config: &GameConfig, state: &GameState, now: EpochMs) -> Rates {
    let m = Modifiers::collect(config, state, now);

    let mut currency = 0u64;
    let mut enjoyment = 0u64;
    for item in &config.items {
        let owned = u64::from(state.owned(&item.id));
        if owned == 0 {
            continue;
        }
        let item_bonus = m.item_bps.get(&item.id).copied().unwrap_or(0);
        currency = currency.saturating_add(scale(item.currency_rate.saturating_mul(owned), item_bonus));
        enjoyment = enjoyment.saturating_add(scale(item.enjoyment_rate.saturating_mul(owned), item_bonus));
    }

    let xp = if crate::career_subsystem::at_max_level(&config.career, &state.therapist_career) {
        0
    } else {
        scale(config.career.xp_rate, m.xp_bps)
    };

    let parts = config.workshop_tiers.iter().fold(0u64, |acc, tier| {
        let owned = u64::from(state.workshop.tiers.get(&tier.id).copied().unwrap_or(0));
        acc.saturating_add(tier.parts_rate.saturating_mul(owned))
    });

    let reputation = config
        .maison_lines
        .iter()
        .filter(|line| state.maison.lines.contains(&line.id))
        .fold(0u64, |acc, line| acc.saturating_add(line.reputation_rate));

    Rates {
        currency:  scale(currency, m.currency_bps),
        enjoyment: scale(enjoyment, m.enjoyment_bps),
        xp,
        parts:     scale(parts, m.parts_bps),
        reputation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_applies_bonus() {
        assert_eq!(scale(1_000, 0), 1_000);
        assert_eq!(scale(1_000, 2_500), 1_250);
        assert_eq!(scale(u64::MAX, BPS_ONE), u64::MAX);
    }

    #[test]
    fn empty_state_produces_only_xp() {
        let config = GameConfig::builtin();
        let state = GameState::fresh(0);
        let r = rates(&config, &state, 0);
        assert_eq!(r.currency, 0);
        assert_eq!(r.enjoyment, 0);
        assert_eq!(r.xp, config.career.xp_rate);
    }

    #[test]
    fn upgrade_levels_stack_additively() {
        let config = GameConfig::builtin();
        let mut state = GameState::fresh(0);
        state.upgrades.insert("polishing-tools".into(), 3);
        let m = Modifiers::collect(&config, &state, 0);
        assert_eq!(m.currency_bps, 1_500);
    }
}
