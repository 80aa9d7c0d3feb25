//! Limited-event scheduler: time-gated events such as "auction-weekend".
//!
//! Each event id owns one `EventWindow` that walks
//!   Dormant -> Active -> Cooldown -> Dormant
//! Activation is only legal from Dormant. Triggering an event that is
//! active or cooling down is declined and leaves the window untouched,
//! so its effect can never stack.

use crate::{
    config::{EventConfig, GameConfig},
    error::{ActionResult, Decline},
    ledger_subsystem::rule_satisfied,
    state::{EventPhase, EventWindow, GameState},
    types::EpochMs,
};

/// A phase change observed while ticking a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTransition {
    pub from: EventPhase,
    pub to:   EventPhase,
    /// The instant the transition was due, not when it was observed.
    pub at_ms: EpochMs,
}

/// Advance a window to `now`. A long gap can produce both
/// Active -> Cooldown and Cooldown -> Dormant in one call.
pub fn tick(window: &EventWindow, now: EpochMs) -> (EventWindow, Vec<EventTransition>) {
    let mut next = window.clone();
    let mut transitions = Vec::new();

    if next.phase == EventPhase::Active && now >= next.active_until_ms {
        next.phase = EventPhase::Cooldown;
        next.completions = next.completions.saturating_add(1);
        transitions.push(EventTransition {
            from:  EventPhase::Active,
            to:    EventPhase::Cooldown,
            at_ms: next.active_until_ms,
        });
    }

    if next.phase == EventPhase::Cooldown && now >= next.next_available_at_ms {
        next.phase = EventPhase::Dormant;
        transitions.push(EventTransition {
            from:  EventPhase::Cooldown,
            to:    EventPhase::Dormant,
            at_ms: next.next_available_at_ms,
        });
    }

    (next, transitions)
}

/// Start the event. Only valid from Dormant.
pub fn activate(
    window: &EventWindow,
    event_id: &str,
    now: EpochMs,
    duration_ms: u64,
    cooldown_ms: u64,
) -> ActionResult<EventWindow> {
    let (current, _) = tick(window, now);
    if current.phase != EventPhase::Dormant {
        return Err(Decline::EventNotDormant { event_id: event_id.to_string() });
    }
    let active_until_ms = now.saturating_add(duration_ms);
    Ok(EventWindow {
        active_until_ms,
        next_available_at_ms: active_until_ms.saturating_add(cooldown_ms),
        phase: EventPhase::Active,
        completions: current.completions,
    })
}

/// Milliseconds until this window's next phase change, if any.
pub fn ms_until_transition(window: &EventWindow, now: EpochMs) -> Option<u64> {
    match window.phase {
        EventPhase::Active   => Some(window.active_until_ms.saturating_sub(now)),
        EventPhase::Cooldown => Some(window.next_available_at_ms.saturating_sub(now)),
        EventPhase::Dormant  => None,
    }
}

pub fn is_active(window: &EventWindow, now: EpochMs) -> bool {
    window.phase == EventPhase::Active && now < window.active_until_ms
}

/// Player-facing activation: resolves the config, checks gating and
/// writes the new window into the state.
pub fn start_event(
    config: &GameConfig,
    state: &GameState,
    event_id: &str,
    now: EpochMs,
) -> ActionResult<GameState> {
    let event: &EventConfig = config
        .event(event_id)
        .ok_or_else(|| Decline::UnknownEntity { entity_id: event_id.to_string() })?;
    if !rule_satisfied(state, &event.unlock) {
        return Err(Decline::LockedEntity { entity_id: event_id.to_string() });
    }

    let window = state.events.get(event_id).cloned().unwrap_or_default();
    let activated = activate(&window, event_id, now, event.duration_ms, event.cooldown_ms)?;

    let mut next = state.clone();
    next.events.insert(event_id.to_string(), activated);
    log::info!("event {event_id} active until {}", next.events[event_id].active_until_ms);
    Ok(next)
}

/// Tick every window in the state. Returns (event id, transition) pairs
/// in due-time order.
pub fn tick_all(state: &mut GameState, now: EpochMs) -> Vec<(String, EventTransition)> {
    let mut all = Vec::new();
    for (event_id, window) in state.events.iter_mut() {
        let (next, transitions) = tick(window, now);
        *window = next;
        all.extend(transitions.into_iter().map(|t| (event_id.clone(), t)));
    }
    all.sort_by_key(|(_, t)| t.at_ms);
    all
}
