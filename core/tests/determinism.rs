//! Two engines, same starting state, same commands at the same instants.
//! They must produce byte-identical event logs and identical states.

use emily_idle_core::{
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    state::GameState,
    store::GameStore,
};

const PROFILE: &str = "det-test";

fn engine_with(state: &GameState, now: u64) -> GameEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store.ensure_profile(PROFILE, PROFILE, now).expect("profile");
    store.write_save(PROFILE, state, now).expect("seed save");
    GameEngine::open(store, PROFILE, GameConfig::builtin(), now).expect("open")
}

fn play(engine: &mut GameEngine) {
    let script: Vec<(u64, PlayerCommand)> = vec![
        (1_000, PlayerCommand::TakeSession),
        (2_000, PlayerCommand::Purchase { entity_id: "starter".into() }),
        (3_000, PlayerCommand::Purchase { entity_id: "starter".into() }),
        (4_000, PlayerCommand::Purchase { entity_id: "classic".into() }),
        (650_000, PlayerCommand::TakeSession),
        (700_000, PlayerCommand::Purchase { entity_id: "polishing-tools".into() }),
        (900_000, PlayerCommand::StartEvent { event_id: "auction-weekend".into() }),
    ];
    for (now, command) in script {
        engine.tick(now - 500).expect("tick");
        engine.submit(command, now).expect("submit");
    }
    engine.tick(5_000_000).expect("final tick");
}

fn payloads(engine: &GameEngine) -> Vec<String> {
    engine
        .event_log()
        .expect("read events")
        .into_iter()
        .map(|e| e.payload)
        .collect()
}

#[test]
fn same_inputs_produce_identical_event_logs() {
    let mut start = GameState::fresh(0);
    start.items.insert("starter".into(), 3);

    let mut engine_a = engine_with(&start, 0);
    let mut engine_b = engine_with(&start, 0);
    play(&mut engine_a);
    play(&mut engine_b);

    let log_a = payloads(&engine_a);
    let log_b = payloads(&engine_b);
    assert_eq!(
        log_a.len(), log_b.len(),
        "Event log lengths differ: {} vs {}",
        log_a.len(), log_b.len()
    );
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Event log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
    assert_eq!(engine_a.state(), engine_b.state());
}

#[test]
fn tick_granularity_does_not_change_the_outcome() {
    let mut start = GameState::fresh(0);
    start.items.insert("starter".into(), 10);

    let mut fine = engine_with(&start, 0);
    let mut coarse = engine_with(&start, 0);

    for second in 1..=900u64 {
        fine.tick(second * 1_000).expect("tick");
    }
    coarse.tick(900_000).expect("tick");

    assert_eq!(fine.state(), coarse.state());
    assert!(fine.state().milestones.contains("apprentice"));
}
