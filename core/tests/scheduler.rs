use emily_idle_core::{
    config::GameConfig,
    error::Decline,
    scheduler_subsystem::{is_active, start_event},
    simulation_subsystem::{advance, advance_detailed, Crossing},
    state::{EventPhase, GameState},
};

const HALF_HOUR: u64 = 30 * 60 * 1_000;
const FOUR_HOURS: u64 = 4 * 60 * 60 * 1_000;

fn config() -> GameConfig {
    let mut config = GameConfig::builtin();
    config.career.xp_rate = 0;
    config
}

fn apprentice_with_starters() -> GameState {
    let mut state = GameState::fresh(0);
    state.items.insert("starter".into(), 10);
    state.milestones.insert("apprentice".into());
    state
}

#[test]
fn event_is_locked_until_its_milestone() {
    let config = config();
    let state = GameState::fresh(0);
    assert_eq!(
        start_event(&config, &state, "auction-weekend", 0).unwrap_err(),
        Decline::LockedEntity { entity_id: "auction-weekend".into() }
    );
    assert_eq!(
        start_event(&config, &state, "flea-market", 0).unwrap_err(),
        Decline::UnknownEntity { entity_id: "flea-market".into() }
    );
}

#[test]
fn started_event_is_active_for_its_duration() {
    let config = config();
    let state = start_event(&config, &apprentice_with_starters(), "auction-weekend", 0).unwrap();

    let window = &state.events["auction-weekend"];
    assert_eq!(window.phase, EventPhase::Active);
    assert_eq!(window.active_until_ms, HALF_HOUR);
    assert_eq!(window.next_available_at_ms, HALF_HOUR + FOUR_HOURS);
    assert!(is_active(window, HALF_HOUR - 1));
    assert!(!is_active(window, HALF_HOUR));
}

#[test]
fn retrigger_while_active_or_cooling_is_declined() {
    let config = config();
    let state = start_event(&config, &apprentice_with_starters(), "auction-weekend", 0).unwrap();

    let err = start_event(&config, &state, "auction-weekend", 1_000).unwrap_err();
    assert_eq!(err, Decline::EventNotDormant { event_id: "auction-weekend".into() });

    let cooling = advance(&config, &state, HALF_HOUR + 5_000);
    assert_eq!(cooling.events["auction-weekend"].phase, EventPhase::Cooldown);
    let before = cooling.clone();
    assert!(start_event(&config, &cooling, "auction-weekend", cooling.simulated_at_ms).is_err());
    assert_eq!(cooling, before);
}

#[test]
fn event_can_run_again_after_cooldown() {
    let config = config();
    let state = start_event(&config, &apprentice_with_starters(), "auction-weekend", 0).unwrap();

    let rested = advance(&config, &state, HALF_HOUR + FOUR_HOURS);
    let window = &rested.events["auction-weekend"];
    assert_eq!(window.phase, EventPhase::Dormant);
    assert_eq!(window.completions, 1);

    let again = start_event(&config, &rested, "auction-weekend", rested.simulated_at_ms).unwrap();
    assert_eq!(again.events["auction-weekend"].phase, EventPhase::Active);
    assert_eq!(again.events["auction-weekend"].completions, 1);
}

#[test]
fn event_bonus_pays_only_inside_the_window() {
    let config = config();
    // 10 starters at 100 cents/s. Apprentice gives +10%, the event +50%.
    let state = start_event(&config, &apprentice_with_starters(), "auction-weekend", 0).unwrap();

    let report = advance_detailed(&config, &state, 2 * HALF_HOUR);

    assert_eq!(report.state.currency_cents, 1_800 * 160 + 1_800 * 110);
    assert_eq!(report.state.events["auction-weekend"].phase, EventPhase::Cooldown);
    assert_eq!(report.state.events["auction-weekend"].completions, 1);
    assert!(report.crossings.iter().any(|(at, c)| {
        *at == HALF_HOUR && matches!(c, Crossing::EventPhaseChanged { event_id, .. } if event_id == "auction-weekend")
    }));
}
