//! Wall clock: the only source of "now" for the engine's callers.
//!
//! The core never reads the system time itself; every operation takes
//! `now` explicitly. Shells pick a clock and pass its reading in.

use crate::types::EpochMs;
use chrono::Utc;
use std::cell::Cell;

pub trait Clock {
    fn now_ms(&self) -> EpochMs;
}

/// Real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> EpochMs {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Hand-driven time for tests and the headless runner.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<EpochMs>,
}

impl ManualClock {
    pub fn new(start: EpochMs) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Move forward by `ms`. Returns the new instant.
    pub fn advance(&self, ms: u64) -> EpochMs {
        let next = self.now.get().saturating_add(ms);
        self.now.set(next);
        next
    }

    pub fn set(&self, now: EpochMs) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> EpochMs {
        self.now.get()
    }
}
