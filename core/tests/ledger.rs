use emily_idle_core::{
    config::GameConfig,
    error::Decline,
    ledger_subsystem::{can_afford, cost_of, is_unlocked, purchase, Resource},
    state::{GameState, NostalgiaPurchase},
};

fn funded(cents: u64) -> GameState {
    let mut state = GameState::fresh(0);
    state.currency_cents = cents;
    state
}

#[test]
fn purchase_debits_and_increments() {
    let config = GameConfig::builtin();
    let state = funded(1_000);

    let receipt = purchase(&config, &state, "starter", 10).expect("affordable");
    assert_eq!(receipt.price.resource, Resource::Currency);
    assert_eq!(receipt.price.amount, 1_000);
    assert_eq!(receipt.state.currency_cents, 0);
    assert_eq!(receipt.state.owned("starter"), 1);
    assert_eq!(receipt.state.catalog.rolls, 1);

    // The input state is untouched.
    assert_eq!(state.owned("starter"), 0);
    assert_eq!(state.currency_cents, 1_000);
}

#[test]
fn insufficient_funds_is_declined() {
    let config = GameConfig::builtin();
    let mut state = funded(1_000);
    state.items.insert("starter".into(), 1);

    let err = purchase(&config, &state, "starter", 0).unwrap_err();
    assert_eq!(
        err,
        Decline::InsufficientFunds { resource: "currency", needed: 1_150, available: 1_000 }
    );
    assert!(!can_afford(&config, &state, "starter"));
}

#[test]
fn costs_strictly_increase() {
    let config = GameConfig::builtin();
    for id in ["starter", "classic", "chronograph", "tourbillon", "polishing-tools", "bench"] {
        let mut prev = 0;
        for owned in 0..40 {
            let cost = cost_of(&config, id, owned).expect("known entity").amount;
            assert!(cost > prev, "{id}: cost {cost} at {owned} did not exceed {prev}");
            prev = cost;
        }
    }
}

#[test]
fn gated_item_unlocks_by_milestone_or_nostalgia() {
    let config = GameConfig::builtin();
    let state = funded(1_000_000);

    assert!(!is_unlocked(&config, &state, "classic"));
    assert_eq!(
        purchase(&config, &state, "classic", 0).unwrap_err(),
        Decline::LockedEntity { entity_id: "classic".into() }
    );

    let mut by_milestone = state.clone();
    by_milestone.milestones.insert("apprentice".into());
    assert!(is_unlocked(&config, &by_milestone, "classic"));
    assert!(purchase(&config, &by_milestone, "classic", 0).is_ok());

    let mut by_nostalgia = state.clone();
    by_nostalgia.nostalgia_unlocks.insert(
        "classic".into(),
        NostalgiaPurchase { cost_points: 1, cycle: 0, purchased_at_ms: 0 },
    );
    assert!(is_unlocked(&config, &by_nostalgia, "classic"));
}

#[test]
fn requirement_counts_gate_upgrades() {
    let config = GameConfig::builtin();
    let mut state = funded(1_000_000);
    state.items.insert("starter".into(), 4);
    assert!(!is_unlocked(&config, &state, "assembly-jigs"));

    state.items.insert("starter".into(), 5);
    let receipt = purchase(&config, &state, "assembly-jigs", 0).expect("unlocked");
    assert_eq!(receipt.state.upgrade_level("assembly-jigs"), 1);
}

#[test]
fn unknown_and_max_level_are_declined() {
    let config = GameConfig::builtin();
    let mut state = funded(u64::MAX / 4);

    assert_eq!(
        purchase(&config, &state, "grandfather-clock", 0).unwrap_err(),
        Decline::UnknownEntity { entity_id: "grandfather-clock".into() }
    );

    state.upgrades.insert("polishing-tools".into(), 10);
    assert_eq!(
        purchase(&config, &state, "polishing-tools", 0).unwrap_err(),
        Decline::MaxLevel { entity_id: "polishing-tools".into() }
    );
}

#[test]
fn workshop_and_crafting_flow() {
    let config = GameConfig::builtin();
    let mut state = funded(10_000_000);

    // The bench needs the journeyman milestone; boosts need a bench.
    assert!(!is_unlocked(&config, &state, "bench"));
    assert!(!is_unlocked(&config, &state, "mainspring-tune"));
    state.milestones.insert("journeyman".into());

    let state = purchase(&config, &state, "bench", 0).expect("bench").state;
    assert_eq!(state.workshop.tiers.get("bench"), Some(&1));

    let state = purchase(&config, &state, "precision-lathe", 0).expect("workshop upgrade").state;
    assert_eq!(
        purchase(&config, &state, "precision-lathe", 0).unwrap_err(),
        Decline::AlreadyOwned { entity_id: "precision-lathe".into() }
    );

    assert_eq!(
        purchase(&config, &state, "mainspring-tune", 0).unwrap_err(),
        Decline::InsufficientFunds { resource: "crafting parts", needed: 50, available: 0 }
    );
    let mut state = state;
    state.crafting_parts = 50;
    let receipt = purchase(&config, &state, "mainspring-tune", 0).expect("boost");
    assert_eq!(receipt.price.resource, Resource::Parts);
    assert_eq!(receipt.state.crafting_parts, 0);
    assert_eq!(receipt.state.crafted_boosts.get("mainspring-tune"), Some(&1));
}

#[test]
fn maison_opens_after_first_prestige() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    state.maison.heritage = 5;

    assert_eq!(
        purchase(&config, &state, "heritage-collection", 0).unwrap_err(),
        Decline::LockedEntity { entity_id: "heritage-collection".into() }
    );

    state.nostalgia_resets = 1;
    let state = purchase(&config, &state, "heritage-collection", 0).expect("line").state;
    assert_eq!(state.maison.heritage, 4);
    assert!(state.maison.lines.contains("heritage-collection"));

    let mut state = state;
    state.maison.reputation = 150;
    let receipt = purchase(&config, &state, "atelier-signature", 0).expect("maison upgrade");
    assert_eq!(receipt.price.resource, Resource::Reputation);
    assert_eq!(receipt.state.maison.reputation, 50);
}

#[test]
fn catalog_rolls_are_reproducible() {
    let config = GameConfig::builtin();
    let buy_many = || {
        let mut state = funded(u64::MAX / 4);
        state.catalog.seed = 0xC0FFEE;
        for _ in 0..100 {
            state = purchase(&config, &state, "starter", 0).expect("funded").state;
        }
        state
    };

    let a = buy_many();
    let b = buy_many();
    assert_eq!(a, b);
    assert_eq!(a.catalog.rolls, 100);
    assert_eq!(a.owned("starter"), 100);

    for entry in &a.catalog.discovered {
        assert!(config.catalog_entries.iter().any(|e| &e.id == entry));
    }
    for tier_id in &a.catalog.tiers {
        let tier = config.catalog_tiers.iter().find(|t| &t.id == tier_id).expect("tier");
        let found = config
            .catalog_entries
            .iter()
            .filter(|e| &e.tier == tier_id && a.catalog.discovered.contains(&e.id))
            .count();
        assert!(found >= tier.required as usize);
    }
}
