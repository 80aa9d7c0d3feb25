//! Idle simulation: advances a state through elapsed time.
//!
//! `advance` is pure: same state + same elapsed time = same result.
//! It drives both the live tick and the offline catch-up on load.
//!
//! ALGORITHM:
//!   1. Settle: apply every threshold already due at the cursor
//!      (level-ups, milestones, event phase changes).
//!   2. Compute rates from the settled state.
//!   3. Find the earliest future threshold crossing under those rates.
//!   4. Accrue up to min(crossing, end) and move the cursor there.
//!   5. Repeat from 1 until the cursor reaches the end.
//!
//! A bonus unlocked at a crossing only applies from that instant on.
//! Applying post-interval rates to the whole interval would pay out a
//! multiplier before it was earned; the subdivision prevents that.
//!
//! Accrual is exact integer arithmetic on micro-unit remainders, so
//! with no crossing inside the interval,
//!   advance(advance(s, a), b) == advance(s, a + b).

use crate::{
    achievement_subsystem, career_subsystem,
    config::GameConfig,
    modifiers::{self, Rates},
    scheduler_subsystem::{self, EventTransition},
    state::GameState,
    types::{EpochMs, MICRO_PER_UNIT},
};

/// A discrete change applied at a threshold inside an interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crossing {
    CareerLevelUp { level: u32 },
    MilestoneReached { milestone_id: String },
    EventPhaseChanged { event_id: String, transition: EventTransition },
}

/// Result of an advance with everything that happened along the way.
#[derive(Debug, Clone)]
pub struct AdvanceReport {
    pub state: GameState,
    /// Crossings in chronological order, tagged with the instant applied.
    pub crossings: Vec<(EpochMs, Crossing)>,
    /// Number of constant-rate segments the interval was split into.
    pub segments: u32,
}

/// Advance `state` by `elapsed_ms`.
pub fn advance(config: &GameConfig, state: &GameState, elapsed_ms: u64) -> GameState {
    advance_detailed(config, state, elapsed_ms).state
}

pub fn advance_detailed(config: &GameConfig, state: &GameState, elapsed_ms: u64) -> AdvanceReport {
    let mut s = state.clone();
    let end = s.simulated_at_ms.saturating_add(elapsed_ms);
    let mut crossings = Vec::new();
    let mut segments = 0u32;

    loop {
        let now = s.simulated_at_ms;
        crossings.extend(settle(config, &mut s).into_iter().map(|c| (now, c)));

        if now >= end {
            break;
        }

        let rates = modifiers::rates(config, &s, now);
        let remaining = end - now;
        let step = next_crossing_ms(config, &s, &rates)
            .map(|ms| ms.clamp(1, remaining))
            .unwrap_or(remaining);

        accrue(&mut s, &rates, step);
        s.simulated_at_ms = now + step;
        segments += 1;
    }

    if segments > 1 {
        log::debug!(
            "advance {elapsed_ms}ms split into {segments} segments ({} crossings)",
            crossings.len()
        );
    }

    AdvanceReport { state: s, crossings, segments }
}

/// Apply every threshold that is due at the state's cursor.
/// Idempotent: settling a settled state changes nothing.
pub fn settle(config: &GameConfig, state: &mut GameState) -> Vec<Crossing> {
    let mut out = Vec::new();
    let now = state.simulated_at_ms;

    for level in career_subsystem::apply_level_ups(&config.career, &mut state.therapist_career) {
        log::debug!("now={now} career level {level}");
        out.push(Crossing::CareerLevelUp { level });
    }

    for milestone_id in achievement_subsystem::reached_milestones(config, state) {
        log::info!("now={now} milestone reached: {milestone_id}");
        state.milestones.insert(milestone_id.clone());
        out.push(Crossing::MilestoneReached { milestone_id });
    }

    for (event_id, transition) in scheduler_subsystem::tick_all(state, now) {
        out.push(Crossing::EventPhaseChanged { event_id, transition });
    }

    out
}

/// Milliseconds of accrual at `rate` (milli-units/s) before `units`
/// whole units have been added on top of `remainder` micro-units.
fn ms_to_accrue(units: u64, remainder: u64, rate: u64) -> Option<u64> {
    if rate == 0 {
        return None;
    }
    let needed = u128::from(units) * u128::from(MICRO_PER_UNIT);
    let needed = needed.saturating_sub(u128::from(remainder));
    let ms = needed.div_ceil(u128::from(rate));
    Some(u64::try_from(ms).unwrap_or(u64::MAX))
}

/// Time until the next threshold under constant `rates`, if any.
fn next_crossing_ms(config: &GameConfig, s: &GameState, rates: &Rates) -> Option<u64> {
    let now = s.simulated_at_ms;
    let mut next: Option<u64> = None;
    let mut consider = |candidate: Option<u64>| {
        if let Some(ms) = candidate {
            next = Some(next.map_or(ms, |n| n.min(ms)));
        }
    };

    let career = &s.therapist_career;
    if !career_subsystem::at_max_level(&config.career, career) {
        let need = career_subsystem::xp_to_next(&config.career, career.level)
            .saturating_sub(career.xp);
        consider(ms_to_accrue(need, s.accrual.xp, rates.xp));
    }

    for milestone in &config.milestones {
        if s.milestones.contains(&milestone.id) {
            continue;
        }
        let need = milestone.run_earned_cents.saturating_sub(s.run_earned_cents);
        consider(ms_to_accrue(need, s.accrual.currency, rates.currency));
    }

    for window in s.events.values() {
        consider(scheduler_subsystem::ms_until_transition(window, now));
    }

    next
}

/// Add `rate * ms` micro-units to `remainder`, returning whole units.
fn carry(remainder: &mut u64, rate: u64, ms: u64) -> u64 {
    let total = u128::from(*remainder) + u128::from(rate) * u128::from(ms);
    let micro = u128::from(MICRO_PER_UNIT);
    *remainder = (total % micro) as u64;
    u64::try_from(total / micro).unwrap_or(u64::MAX)
}

fn accrue(s: &mut GameState, rates: &Rates, ms: u64) {
    let currency = carry(&mut s.accrual.currency, rates.currency, ms);
    let enjoyment = carry(&mut s.accrual.enjoyment, rates.enjoyment, ms);
    let xp = carry(&mut s.accrual.xp, rates.xp, ms);
    let parts = carry(&mut s.accrual.parts, rates.parts, ms);
    let reputation = carry(&mut s.accrual.reputation, rates.reputation, ms);

    s.credit_currency(currency);
    s.credit_enjoyment(enjoyment);
    s.therapist_career.xp = s.therapist_career.xp.saturating_add(xp);
    s.crafting_parts = s.crafting_parts.saturating_add(parts);
    s.maison.reputation = s.maison.reputation.saturating_add(reputation);
}
