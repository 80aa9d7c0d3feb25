use emily_idle_core::{
    achievement_subsystem::{apply, evaluate, reached_milestones, visible_achievements},
    config::GameConfig,
    state::GameState,
};

fn collector_state() -> GameState {
    let mut state = GameState::fresh(0);
    state.lifetime_earned_cents = 150_000;
    state.run_earned_cents = 60_000;
    state.items.insert("starter".into(), 12);
    state
}

#[test]
fn evaluate_reports_newly_satisfied_rules() {
    let config = GameConfig::builtin();
    let unlocked = evaluate(&config, &collector_state());
    let ids: Vec<&str> = unlocked.iter().map(String::as_str).collect();
    assert_eq!(ids, vec!["first-dollar", "starter-shelf", "thousandaire"]);
}

#[test]
fn apply_is_idempotent() {
    let config = GameConfig::builtin();
    let mut state = collector_state();

    let first = apply(&config, &mut state);
    assert_eq!(first.len(), 3);
    let snapshot = state.clone();

    assert!(apply(&config, &mut state).is_empty());
    assert_eq!(state, snapshot);
    assert!(evaluate(&config, &state).is_empty());
}

#[test]
fn achievements_stay_unlocked_after_the_predicate_fails() {
    let config = GameConfig::builtin();
    let mut state = collector_state();
    apply(&config, &mut state);

    state.items.clear();
    state.run_earned_cents = 0;
    assert!(evaluate(&config, &state).is_empty());
    assert!(state.achievements.contains("starter-shelf"));
}

#[test]
fn milestones_follow_run_earnings() {
    let config = GameConfig::builtin();
    let state = collector_state();
    let reached = reached_milestones(&config, &state);
    assert_eq!(reached.into_iter().collect::<Vec<_>>(), vec!["apprentice".to_string()]);

    let mut settled = state.clone();
    settled.milestones.insert("apprentice".into());
    assert!(reached_milestones(&config, &settled).is_empty());
}

#[test]
fn hide_completed_filters_the_list() {
    let config = GameConfig::builtin();
    let mut state = collector_state();
    apply(&config, &mut state);

    let all = visible_achievements(&config, &state, false);
    assert_eq!(all.len(), config.achievements.len());

    let open = visible_achievements(&config, &state, true);
    assert_eq!(open.len(), config.achievements.len() - 3);
    assert!(open.iter().all(|a| !state.achievements.contains(&a.id)));
}
