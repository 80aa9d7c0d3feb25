//! Catalog: collectible reference watches discovered through purchases.
//!
//! Discovery is deterministic: roll N for a save always draws from the
//! stream keyed by (catalog.seed, N). The catalog survives prestige.

use crate::{
    config::GameConfig,
    rng::{RngStream, StreamRng},
    state::GameState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub entry_id: String,
    /// Tiers completed by this discovery.
    pub tiers_unlocked: Vec<String>,
}

/// Roll for a discovery after buying one `item_id`. Always consumes a
/// roll, even when nothing is found, so later rolls stay reproducible.
pub fn roll_on_purchase(
    config: &GameConfig,
    state: &mut GameState,
    item_id: &str,
) -> Option<Discovery> {
    let chance = config.item(item_id)?.catalog_discovery_bps;
    let roll = state.catalog.rolls;
    state.catalog.rolls = roll.saturating_add(1);

    let mut rng = StreamRng::new(state.catalog.seed, RngStream::CatalogDiscovery, roll);
    if !rng.chance_bps(chance) {
        return None;
    }

    let undiscovered: Vec<&str> = config
        .catalog_entries
        .iter()
        .filter(|e| !state.catalog.discovered.contains(&e.id))
        .map(|e| e.id.as_str())
        .collect();
    if undiscovered.is_empty() {
        return None;
    }

    let pick = undiscovered[rng.next_u64_below(undiscovered.len() as u64) as usize].to_string();
    state.catalog.discovered.insert(pick.clone());
    let tiers_unlocked = refresh_tiers(config, state);
    log::info!("catalog: discovered {pick} on roll {roll}");

    Some(Discovery { entry_id: pick, tiers_unlocked })
}

/// Unlock every tier whose discovered count meets its requirement.
/// Returns the tiers newly unlocked.
pub fn refresh_tiers(config: &GameConfig, state: &mut GameState) -> Vec<String> {
    let mut unlocked = Vec::new();
    for tier in &config.catalog_tiers {
        if state.catalog.tiers.contains(&tier.id) {
            continue;
        }
        let found = config
            .catalog_entries
            .iter()
            .filter(|e| e.tier == tier.id && state.catalog.discovered.contains(&e.id))
            .count();
        if found >= tier.required as usize {
            state.catalog.tiers.insert(tier.id.clone());
            unlocked.push(tier.id.clone());
        }
    }
    unlocked
}

/// (discovered, total) for display.
pub fn progress(config: &GameConfig, state: &GameState) -> (usize, usize) {
    (state.catalog.discovered.len(), config.catalog_entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_unlocks_when_its_set_is_complete() {
        let config = GameConfig::builtin();
        let mut state = GameState::fresh(0);
        state.catalog.discovered.insert("ref-1931".into());
        state.catalog.discovered.insert("ref-1945".into());
        assert!(refresh_tiers(&config, &mut state).is_empty());

        state.catalog.discovered.insert("ref-1953".into());
        assert_eq!(refresh_tiers(&config, &mut state), vec!["vintage".to_string()]);
        assert!(refresh_tiers(&config, &mut state).is_empty());
        assert_eq!(progress(&config, &state), (3, 8));
    }

    #[test]
    fn every_roll_is_consumed() {
        let mut config = GameConfig::builtin();
        config.items[0].catalog_discovery_bps = 0;
        let mut state = GameState::fresh(7);
        for _ in 0..5 {
            assert!(roll_on_purchase(&config, &mut state, "starter").is_none());
        }
        assert_eq!(state.catalog.rolls, 5);
    }

    #[test]
    fn full_catalog_finds_nothing_new() {
        let mut config = GameConfig::builtin();
        config.items[0].catalog_discovery_bps = 10_000;
        let mut state = GameState::fresh(7);
        for entry in &config.catalog_entries {
            state.catalog.discovered.insert(entry.id.clone());
        }
        assert!(roll_on_purchase(&config, &mut state, "starter").is_none());
        assert_eq!(state.catalog.rolls, 1);
    }
}
