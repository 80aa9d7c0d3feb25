use emily_idle_core::{
    command::PlayerCommand,
    config::{GameConfig, RefundPolicy},
    engine::GameEngine,
    error::Decline,
    ledger_subsystem::is_unlocked,
    prestige_subsystem::{buy_unlock, can_refund, commit, points_for, preview, refund_unlock, PrestigeFlow},
    save_codec,
    state::GameState,
    store::GameStore,
};

fn late_run() -> GameState {
    let mut state = GameState::fresh(0);
    state.currency_cents = 85_000;
    state.enjoyment_cents = 32_000;
    state.nostalgia_enjoyment_earned_cents = 16_000_000;
    state.run_earned_cents = 3_000_000;
    state.lifetime_earned_cents = 3_000_000;
    state.items.insert("starter".into(), 30);
    state.upgrades.insert("polishing-tools".into(), 2);
    state.milestones.insert("apprentice".into());
    state.achievements.insert("first-dollar".into());
    state.catalog.discovered.insert("ref-1931".into());
    state.therapist_career.level = 4;
    state
}

#[test]
fn prestige_resets_run_and_awards_points() {
    let config = GameConfig::builtin();
    let state = late_run();

    assert_eq!(preview(&config, &state, 1_000).points_to_gain, 4);

    let next = commit(&config, &state, 1_000);
    assert_eq!(next.currency_cents, 0);
    assert_eq!(next.enjoyment_cents, 0);
    assert_eq!(next.nostalgia_points, 4);
    assert_eq!(next.nostalgia_resets, 1);
    assert_eq!(next.nostalgia_last_gain, 4);
    assert_eq!(next.nostalgia_last_prestiged_at_ms, Some(1_000));
    assert_eq!(next.nostalgia_enjoyment_earned_cents, 0);
    assert_eq!(next.maison.heritage, 4);

    // Run-scoped progress is gone.
    assert!(next.items.is_empty());
    assert!(next.upgrades.is_empty());
    assert!(next.milestones.is_empty());
    assert_eq!(next.run_earned_cents, 0);

    // Prestige-scoped progress survives.
    assert_eq!(next.lifetime_earned_cents, 3_000_000);
    assert!(next.achievements.contains("first-dollar"));
    assert!(next.catalog.discovered.contains("ref-1931"));
    assert_eq!(next.therapist_career.level, 4);
}

#[test]
fn preview_is_pure_and_idempotent() {
    let config = GameConfig::builtin();
    let state = late_run();
    let before = state.clone();

    let a = preview(&config, &state, 500);
    let b = preview(&config, &state, 500);
    assert_eq!(a, b);
    assert_eq!(state, before);
    assert_eq!(a.resulting_state, commit(&config, &state, 500));
}

#[test]
fn points_never_decrease_with_more_enjoyment() {
    let config = GameConfig::builtin();
    let mut prev = 0;
    for earned in (0..200_000_000u64).step_by(1_234_567) {
        let points = points_for(&config, earned);
        assert!(points >= prev);
        prev = points;
    }
    assert_eq!(points_for(&config, 999_999), 0);
    assert_eq!(points_for(&config, 1_000_000), 1);
    assert_eq!(points_for(&config, 100_000_000), 10);
}

#[test]
fn zero_gain_prestige_still_counts_as_a_reset() {
    let config = GameConfig::builtin();
    let next = commit(&config, &GameState::fresh(0), 10);
    assert_eq!(next.nostalgia_last_gain, 0);
    assert_eq!(next.nostalgia_resets, 1);
}

#[test]
fn classic_unlock_with_one_point() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    state.nostalgia_points = 1;
    assert!(!is_unlocked(&config, &state, "classic"));

    let state = buy_unlock(&config, &state, "classic", 20).expect("one point is enough");
    assert_eq!(state.nostalgia_points, 0);
    assert!(state.has_nostalgia_unlock("classic"));
    assert!(is_unlocked(&config, &state, "classic"));
    assert!(can_refund(&config, &state, "classic"));

    assert_eq!(
        buy_unlock(&config, &state, "classic", 21).unwrap_err(),
        Decline::AlreadyOwned { entity_id: "classic".into() }
    );

    // Survives a save/load cycle.
    let blob = save_codec::save(&state, 30).expect("save");
    let reloaded = save_codec::load(Some(&blob), 40).expect("load").into_state();
    assert!(reloaded.has_nostalgia_unlock("classic"));
    assert_eq!(reloaded.nostalgia_points, 0);

    // And through the store into a freshly opened engine, refund included.
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store.ensure_profile("p", "p", 30).expect("profile");
    store.write_save("p", &state, 30).expect("save");
    let mut engine = GameEngine::open(store, "p", config.clone(), 40).expect("open");
    assert!(engine.state().has_nostalgia_unlock("classic"));
    assert!(can_refund(&config, engine.state(), "classic"));

    let outcome = engine
        .submit(PlayerCommand::RefundNostalgiaUnlock { unlock_id: "classic".into() }, 50)
        .expect("refund");
    assert!(outcome.is_accepted());
    assert!(!engine.state().has_nostalgia_unlock("classic"));
    assert_eq!(engine.state().nostalgia_points, 1);
}

#[test]
fn unaffordable_and_unknown_unlocks_are_declined() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    state.nostalgia_points = 2;

    assert_eq!(
        buy_unlock(&config, &state, "tourbillon", 0).unwrap_err(),
        Decline::InsufficientFunds { resource: "nostalgia points", needed: 8, available: 2 }
    );
    assert_eq!(
        buy_unlock(&config, &state, "time-machine", 0).unwrap_err(),
        Decline::UnknownEntity { entity_id: "time-machine".into() }
    );
}

#[test]
fn refund_only_within_the_purchase_cycle() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    state.nostalgia_points = 3;

    let bought = buy_unlock(&config, &state, "golden-memories", 0).expect("affordable");
    assert!(can_refund(&config, &bought, "golden-memories"));
    let refunded = refund_unlock(&config, &bought, "golden-memories").expect("same cycle");
    assert_eq!(refunded.nostalgia_points, 3);
    assert!(!refunded.has_nostalgia_unlock("golden-memories"));

    let after_reset = commit(&config, &bought, 100);
    assert_eq!(
        refund_unlock(&config, &after_reset, "golden-memories").unwrap_err(),
        Decline::IneligibleRefund { unlock_id: "golden-memories".into() }
    );
    assert!(after_reset.has_nostalgia_unlock("golden-memories"));

    let mut anytime = config.clone();
    anytime.prestige.refund_policy = RefundPolicy::Anytime;
    assert!(refund_unlock(&anytime, &after_reset, "golden-memories").is_ok());
}

#[test]
fn confirmation_commits_once() {
    let config = GameConfig::builtin();
    let state = late_run();
    let mut flow = PrestigeFlow::default();

    assert!(flow.request(&config, &state, 10, false).is_none());
    assert!(flow.is_pending());

    let next = flow.confirm(&config, &state, 11).expect("pending");
    assert_eq!(next.nostalgia_resets, 1);
    assert_eq!(flow, PrestigeFlow::Committed { points_gained: 4, committed_at_ms: 11 });

    assert_eq!(flow.confirm(&config, &next, 12).unwrap_err(), Decline::NoPendingPrestige);
}

#[test]
fn skipped_confirmation_commits_immediately() {
    let config = GameConfig::builtin();
    let mut flow = PrestigeFlow::default();

    let next = flow.request(&config, &late_run(), 10, true).expect("committed");
    assert_eq!(next.nostalgia_points, 4);
    assert!(!flow.is_pending());
}

#[test]
fn cancel_returns_to_idle() {
    let config = GameConfig::builtin();
    let mut flow = PrestigeFlow::default();
    flow.request(&config, &late_run(), 10, false);
    flow.cancel();
    assert_eq!(flow, PrestigeFlow::Idle);
    assert!(flow.confirm(&config, &late_run(), 11).is_err());
}

#[test]
fn unlocks_shape_the_next_run() {
    let config = GameConfig::builtin();
    let mut state = late_run();
    state.nostalgia_points = 10;
    state.workshop.tiers.insert("bench".into(), 2);
    state.crafting_parts = 77;

    let state = buy_unlock(&config, &state, "head-start", 0).expect("head start");
    let state = buy_unlock(&config, &state, "heirloom-bench", 0).expect("heirloom bench");

    let next = commit(&config, &state, 50);
    assert_eq!(next.currency_cents, 100_000);
    assert_eq!(next.workshop.tiers.get("bench"), Some(&2));
    assert_eq!(next.crafting_parts, 77);
    assert_eq!(next.nostalgia_points, 3 + 4);
}
