//! Nostalgia: the prestige reset and its permanent-unlock shop.
//!
//! TWO-PHASE COMMIT:
//!   - `preview` is pure. The UI may call it as often as it likes.
//!   - `commit` is the only transition that resets the run.
//!   - `PrestigeFlow` tracks confirmation so one confirmation can
//!     commit at most once.
//!
//! Run-scoped (cleared): balances, items, upgrades, milestones, run
//! earned, the nostalgia-earned counter, accrual remainders, the career
//! cooldown, and the workshop/crafting layer unless kept.
//! Prestige-scoped (kept): nostalgia points/resets/unlocks, maison
//! (plus the heritage grant), catalog, achievements, lifetime totals,
//! career level and xp, event windows.

use crate::{
    config::{GameConfig, NostalgiaEffect, RefundPolicy},
    error::{ActionResult, Decline},
    state::{AccrualRemainders, GameState, NostalgiaPurchase, WorkshopState},
    types::{Cents, EpochMs},
};
use std::collections::{BTreeMap, BTreeSet};

/// Points awarded for `earned_cents` of enjoyment this cycle.
/// Monotonic: earning more never yields fewer points.
pub fn points_for(config: &GameConfig, earned_cents: Cents) -> u64 {
    isqrt(earned_cents / config.prestige.points_divisor_cents.max(1))
}

fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    // Newton's method on integers; starts above the root.
    let mut x = n;
    let mut y = x / 2 + x % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrestigePreview {
    pub points_to_gain: u64,
    pub resulting_state: GameState,
}

/// What a prestige at `now` would do, without doing it.
pub fn preview(config: &GameConfig, state: &GameState, now: EpochMs) -> PrestigePreview {
    let points_to_gain = points_for(config, state.nostalgia_enjoyment_earned_cents);
    PrestigePreview {
        points_to_gain,
        resulting_state: reset_run(config, state, points_to_gain, now),
    }
}

/// Perform the prestige.
pub fn commit(config: &GameConfig, state: &GameState, now: EpochMs) -> GameState {
    let PrestigePreview { points_to_gain, resulting_state } = preview(config, state, now);
    log::info!(
        "prestige #{}: +{points_to_gain} nostalgia (total {})",
        resulting_state.nostalgia_resets,
        resulting_state.nostalgia_points
    );
    resulting_state
}

fn keeps_workshop(config: &GameConfig, state: &GameState) -> bool {
    config.prestige.keep_workshop
        || config.nostalgia_unlocks.iter().any(|u| {
            matches!(u.effect, NostalgiaEffect::KeepWorkshop) && state.has_nostalgia_unlock(&u.id)
        })
}

fn starting_cents(config: &GameConfig, state: &GameState) -> Cents {
    config
        .nostalgia_unlocks
        .iter()
        .filter(|u| state.has_nostalgia_unlock(&u.id))
        .filter_map(|u| match u.effect {
            NostalgiaEffect::StartingCents { cents } => Some(cents),
            _ => None,
        })
        .fold(0, Cents::saturating_add)
}

fn reset_run(config: &GameConfig, state: &GameState, gain: u64, now: EpochMs) -> GameState {
    let mut next = state.clone();

    next.currency_cents = starting_cents(config, state);
    next.enjoyment_cents = 0;
    next.run_earned_cents = 0;
    next.nostalgia_enjoyment_earned_cents = 0;
    next.items = BTreeMap::new();
    next.upgrades = BTreeMap::new();
    next.milestones = BTreeSet::new();
    next.accrual = AccrualRemainders::default();
    next.therapist_career.cooldown_until_ms = 0;

    if !keeps_workshop(config, state) {
        next.workshop = WorkshopState::default();
        next.crafting_parts = 0;
        next.crafted_boosts = BTreeMap::new();
    }

    next.nostalgia_points = next.nostalgia_points.saturating_add(gain);
    next.nostalgia_resets = next.nostalgia_resets.saturating_add(1);
    next.nostalgia_last_gain = gain;
    next.nostalgia_last_prestiged_at_ms = Some(now);
    next.maison.heritage = next
        .maison
        .heritage
        .saturating_add(gain.saturating_mul(config.prestige.heritage_per_point));

    next
}

// ── Confirmation flow ─────────────────────────────────────────────

/// Prestige confirmation state.
///   Idle -> PendingConfirmation -> Committed
///   Idle -> Committed                (confirmation skipped)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PrestigeFlow {
    #[default]
    Idle,
    PendingConfirmation { points_to_gain: u64, requested_at_ms: EpochMs },
    Committed { points_gained: u64, committed_at_ms: EpochMs },
}

impl PrestigeFlow {
    /// Start a prestige. With `skip_confirmation` the commit happens now
    /// and the new state is returned; otherwise the flow waits.
    /// A newer request supersedes a pending one.
    pub fn request(
        &mut self,
        config: &GameConfig,
        state: &GameState,
        now: EpochMs,
        skip_confirmation: bool,
    ) -> Option<GameState> {
        let points_to_gain = points_for(config, state.nostalgia_enjoyment_earned_cents);
        if skip_confirmation {
            *self = Self::Committed { points_gained: points_to_gain, committed_at_ms: now };
            return Some(commit(config, state, now));
        }
        *self = Self::PendingConfirmation { points_to_gain, requested_at_ms: now };
        None
    }

    /// Confirm the pending prestige. A second confirm is declined.
    pub fn confirm(
        &mut self,
        config: &GameConfig,
        state: &GameState,
        now: EpochMs,
    ) -> ActionResult<GameState> {
        match self {
            Self::PendingConfirmation { .. } => {
                let next = commit(config, state, now);
                *self = Self::Committed {
                    points_gained: next.nostalgia_last_gain,
                    committed_at_ms: now,
                };
                Ok(next)
            }
            _ => Err(Decline::NoPendingPrestige),
        }
    }

    pub fn cancel(&mut self) {
        if matches!(self, Self::PendingConfirmation { .. }) {
            *self = Self::Idle;
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingConfirmation { .. })
    }
}

// ── Nostalgia unlock shop ─────────────────────────────────────────

pub fn buy_unlock(
    config: &GameConfig,
    state: &GameState,
    unlock_id: &str,
    now: EpochMs,
) -> ActionResult<GameState> {
    let unlock = config
        .nostalgia_unlock(unlock_id)
        .ok_or_else(|| Decline::UnknownEntity { entity_id: unlock_id.to_string() })?;
    if state.has_nostalgia_unlock(unlock_id) {
        return Err(Decline::AlreadyOwned { entity_id: unlock_id.to_string() });
    }
    if state.nostalgia_points < unlock.cost_points {
        return Err(Decline::InsufficientFunds {
            resource: "nostalgia points",
            needed: unlock.cost_points,
            available: state.nostalgia_points,
        });
    }

    let mut next = state.clone();
    next.nostalgia_points -= unlock.cost_points;
    next.nostalgia_unlocks.insert(
        unlock_id.to_string(),
        NostalgiaPurchase {
            cost_points: unlock.cost_points,
            cycle: state.nostalgia_resets,
            purchased_at_ms: now,
        },
    );
    log::info!("nostalgia unlock {unlock_id} bought for {} points", unlock.cost_points);
    Ok(next)
}

pub fn can_refund(config: &GameConfig, state: &GameState, unlock_id: &str) -> bool {
    match state.nostalgia_unlocks.get(unlock_id) {
        Some(purchase) => match config.prestige.refund_policy {
            RefundPolicy::CurrentCycle => purchase.cycle == state.nostalgia_resets,
            RefundPolicy::Anytime => true,
        },
        None => false,
    }
}

/// Undo a nostalgia purchase and return the points actually spent.
pub fn refund_unlock(
    config: &GameConfig,
    state: &GameState,
    unlock_id: &str,
) -> ActionResult<GameState> {
    if !can_refund(config, state, unlock_id) {
        return Err(Decline::IneligibleRefund { unlock_id: unlock_id.to_string() });
    }
    let mut next = state.clone();
    let purchase = next
        .nostalgia_unlocks
        .remove(unlock_id)
        .ok_or_else(|| Decline::IneligibleRefund { unlock_id: unlock_id.to_string() })?;
    next.nostalgia_points = next.nostalgia_points.saturating_add(purchase.cost_points);
    log::info!("nostalgia unlock {unlock_id} refunded ({} points)", purchase.cost_points);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_exact_and_floor() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
    }

    #[test]
    fn points_are_monotonic() {
        let config = GameConfig::builtin();
        let mut prev = 0;
        for step in 0..500u64 {
            let p = points_for(&config, step * 777_777);
            assert!(p >= prev);
            prev = p;
        }
    }
}
