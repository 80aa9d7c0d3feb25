//! Achievement and milestone evaluation.
//!
//! Both scans are pure and idempotent: they report ids whose predicate
//! holds and which the state does not already carry. Unlocks are one-way;
//! only a full game reset clears achievements. Milestones are run-scoped
//! and cleared by prestige.

use crate::{
    config::{AchievementRule, GameConfig},
    state::GameState,
};
use std::collections::BTreeSet;

pub fn rule_holds(rule: &AchievementRule, state: &GameState) -> bool {
    match rule {
        AchievementRule::LifetimeEarned { cents }   => state.lifetime_earned_cents >= *cents,
        AchievementRule::RunEarned { cents }        => state.run_earned_cents >= *cents,
        AchievementRule::ItemOwned { item, count }  => state.owned(item) >= *count,
        AchievementRule::TotalItems { count }       => state.total_items() >= *count,
        AchievementRule::NostalgiaResets { count }  => state.nostalgia_resets >= *count,
        AchievementRule::CareerLevel { level }      => state.therapist_career.level >= *level,
        AchievementRule::CatalogDiscovered { count } => {
            state.catalog.discovered.len() >= *count as usize
        }
        AchievementRule::MaisonLines { count } => state.maison.lines.len() >= *count as usize,
        AchievementRule::EventCompletions { event, count } => state
            .events
            .get(event)
            .map(|w| w.completions >= *count)
            .unwrap_or(false),
    }
}

/// Achievements newly satisfied by `state`.
pub fn evaluate(config: &GameConfig, state: &GameState) -> BTreeSet<String> {
    config
        .achievements
        .iter()
        .filter(|a| !state.achievements.contains(&a.id))
        .filter(|a| rule_holds(&a.rule, state))
        .map(|a| a.id.clone())
        .collect()
}

/// Record newly satisfied achievements. Returns the ids added.
pub fn apply(config: &GameConfig, state: &mut GameState) -> BTreeSet<String> {
    let unlocked = evaluate(config, state);
    for id in &unlocked {
        log::info!("achievement unlocked: {id}");
        state.achievements.insert(id.clone());
    }
    unlocked
}

/// Milestones newly reached by the current run.
pub fn reached_milestones(config: &GameConfig, state: &GameState) -> BTreeSet<String> {
    config
        .milestones
        .iter()
        .filter(|m| !state.milestones.contains(&m.id))
        .filter(|m| state.run_earned_cents >= m.run_earned_cents)
        .map(|m| m.id.clone())
        .collect()
}

/// Display filter for the achievements list.
pub fn visible_achievements<'a>(
    config: &'a GameConfig,
    state: &GameState,
    hide_completed: bool,
) -> Vec<&'a crate::config::AchievementConfig> {
    config
        .achievements
        .iter()
        .filter(|a| !(hide_completed && state.achievements.contains(&a.id)))
        .collect()
}
