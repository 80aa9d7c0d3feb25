//! Therapist career: Emily's side job.
//!
//! xp accrues idly (see simulation_subsystem) and from sessions.
//! Each level above 1 adds `level_bonus_bps` to currency production.
//! Sessions pay out immediately and then go on cooldown.

use crate::{
    config::{CareerConfig, GameConfig},
    error::{ActionResult, Decline},
    state::{GameState, TherapistCareer},
    types::{Cents, EpochMs},
};

/// xp needed to go from `level` to `level + 1`.
pub fn xp_to_next(config: &CareerConfig, level: u32) -> u64 {
    config.base_xp_per_level.saturating_mul(u64::from(level.max(1)))
}

pub fn at_max_level(config: &CareerConfig, career: &TherapistCareer) -> bool {
    career.level >= config.max_level
}

/// Roll stored xp over into levels. Returns every level reached.
/// xp is discarded once the cap is hit.
pub fn apply_level_ups(config: &CareerConfig, career: &mut TherapistCareer) -> Vec<u32> {
    let mut reached = Vec::new();
    while !at_max_level(config, career) {
        let need = xp_to_next(config, career.level);
        if career.xp < need {
            break;
        }
        career.xp -= need;
        career.level += 1;
        reached.push(career.level);
    }
    if at_max_level(config, career) {
        career.xp = 0;
    }
    reached
}

pub fn session_payout(config: &CareerConfig, career: &TherapistCareer) -> Cents {
    config.session_cents.saturating_mul(u64::from(career.level.max(1)))
}

/// Run one therapy session at `now`.
pub fn take_session(
    config: &GameConfig,
    state: &GameState,
    now: EpochMs,
) -> ActionResult<GameState> {
    let career = &state.therapist_career;
    if now < career.cooldown_until_ms {
        return Err(Decline::OnCooldown { until_ms: career.cooldown_until_ms });
    }

    let mut next = state.clone();
    let payout = session_payout(&config.career, career);
    next.credit_currency(payout);

    let career = &mut next.therapist_career;
    career.sessions = career.sessions.saturating_add(1);
    career.cooldown_until_ms = now.saturating_add(config.career.session_cooldown_ms);
    if !at_max_level(&config.career, career) {
        career.xp = career.xp.saturating_add(config.career.session_xp);
    }
    let levels = apply_level_ups(&config.career, career);

    log::debug!(
        "career session: paid {payout} cents, level {} (+{} levels)",
        career.level,
        levels.len()
    );
    Ok(next)
}
