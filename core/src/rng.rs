//! Deterministic random number generation.
//!
//! RULE: Nothing in the game core may call any platform RNG.
//! All randomness flows through StreamRng instances derived from a seed
//! stored in the save, so replaying the same actions against the same
//! save always gives the same result.
//!
//! Each draw is keyed by (seed, stream, roll index). This means:
//!   - Adding a new stream never changes existing streams.
//!   - A roll can be reproduced in isolation from its index alone.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single roll on one stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    pub fn new(seed: u64, stream: RngStream, roll: u64) -> Self {
        let derived_seed = seed
            ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ roll.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        Self {
            name: stream.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial in basis points: true with probability bps / 10_000.
    pub fn chance_bps(&mut self, bps: u64) -> bool {
        self.next_u64_below(crate::types::BPS_ONE) < bps
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    CatalogDiscovery = 0,
    // New streams go here.
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogDiscovery => "catalog_discovery",
        }
    }
}
