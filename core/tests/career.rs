use emily_idle_core::{
    career_subsystem::{session_payout, take_session},
    config::GameConfig,
    error::Decline,
    modifiers,
    state::GameState,
};

const COOLDOWN: u64 = 10 * 60 * 1_000;

#[test]
fn session_pays_and_goes_on_cooldown() {
    let config = GameConfig::builtin();
    let state = take_session(&config, &GameState::fresh(0), 1_000).unwrap();

    assert_eq!(state.currency_cents, 2_500);
    assert_eq!(state.run_earned_cents, 2_500);
    assert_eq!(state.therapist_career.sessions, 1);
    assert_eq!(state.therapist_career.xp, 25);
    assert_eq!(state.therapist_career.cooldown_until_ms, 1_000 + COOLDOWN);

    assert_eq!(
        take_session(&config, &state, 1_000 + COOLDOWN - 1).unwrap_err(),
        Decline::OnCooldown { until_ms: 1_000 + COOLDOWN }
    );
    assert!(take_session(&config, &state, 1_000 + COOLDOWN).is_ok());
}

#[test]
fn sessions_level_the_career_and_raise_payouts() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    let mut now = 0;
    for _ in 0..4 {
        state = take_session(&config, &state, now).unwrap();
        now += COOLDOWN;
    }

    assert_eq!(state.therapist_career.level, 2);
    assert_eq!(state.therapist_career.xp, 0);
    assert_eq!(state.currency_cents, 4 * 2_500);
    assert_eq!(session_payout(&config.career, &state.therapist_career), 5_000);
}

#[test]
fn career_level_boosts_currency_rate() {
    let config = GameConfig::builtin();
    let mut state = GameState::fresh(0);
    state.items.insert("starter".into(), 10);
    let base = modifiers::rates(&config, &state, 0).currency;

    state.therapist_career.level = 6;
    // Five levels above one at +2% each.
    assert_eq!(modifiers::rates(&config, &state, 0).currency, base * 110 / 100);
}

#[test]
fn max_level_stops_xp() {
    let mut config = GameConfig::builtin();
    config.career.max_level = 1;
    let state = take_session(&config, &GameState::fresh(0), 0).unwrap();
    assert_eq!(state.therapist_career.level, 1);
    assert_eq!(state.therapist_career.xp, 0);
    assert_eq!(modifiers::rates(&config, &state, 0).xp, 0);
}
