//! Shared primitive types used across the entire game core.

/// Monetary amount in integer minor units (cents). Never a float.
pub type Cents = u64;

/// Wall-clock instant as milliseconds since the Unix epoch.
pub type EpochMs = u64;

/// A stable string identifier for any catalogued entity
/// (item, upgrade, milestone, event, unlock, ...).
pub type EntityId = String;

/// The player profile a save slot belongs to.
pub type ProfileId = String;

/// Multiplier expressed in basis points. 10_000 = 1.0x.
pub type Bps = u64;

pub const BPS_ONE: Bps = 10_000;

/// Accrual remainders are tracked in micro-units: one whole unit
/// (cent, xp point, part) is 1_000_000 micro-units. A rate of
/// `r` milli-units per second accrues `r` micro-units per millisecond.
pub const MICRO_PER_UNIT: u64 = 1_000_000;
