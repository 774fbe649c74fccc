//! crates/mpi_core/src/rng.rs
//!
//! Deterministic variance source for the country synthesizer.
//!
//! The synthesizer consumes one uniform draw in `[-0.5, 0.5)` per record and
//! must accept an injectable source so tests can force exact outputs. The
//! production source is ChaCha20 with an explicit 32-byte seed derived from a
//! 64-bit seed (little-endian bytes in the first 8 positions, the rest zero),
//! which keeps the stream stable across platforms and builds.

use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};

/// A pluggable source of variance draws.
///
/// Contract: every call returns a value in `[-0.5, 0.5)`. The synthesizer
/// reuses a single draw to perturb both headcount and intensity of one row.
pub trait VarianceSource {
    fn next_variance(&mut self) -> f64;
}

/// Seedable, reproducible variance source (the production implementation).
#[derive(Debug, Clone)]
pub struct VarianceRng {
    rng: ChaCha20Rng,
    draws: u64,
}

impl VarianceRng {
    /// Construct from a 64-bit seed. The mapping from `u64` to the ChaCha20
    /// 32-byte seed is explicit: `seed.to_le_bytes()` into the first 8 bytes;
    /// the remaining 24 bytes are zero.
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self { rng: ChaCha20Rng::from_seed(seed32), draws: 0 }
    }

    /// Draw a fresh seed from OS entropy and return the source together with
    /// the seed, so unseeded runs can still be logged and replayed.
    pub fn from_os_entropy() -> (Self, u64) {
        let seed = OsRng.next_u64();
        (Self::from_seed_u64(seed), seed)
    }

    /// Number of draws consumed so far.
    #[inline]
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl VarianceSource for VarianceRng {
    /// Uniform in `[-0.5, 0.5)`: top 53 bits of a u64 mapped onto the unit
    /// interval, then shifted. 53 bits so every value is exactly
    /// representable in an f64 mantissa.
    #[inline]
    fn next_variance(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        let bits = self.rng.next_u64() >> 11;
        (bits as f64) / (1u64 << 53) as f64 - 0.5
    }
}

/// Constant source for tests and scenario pinning.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariance(pub f64);

impl VarianceSource for FixedVariance {
    #[inline]
    fn next_variance(&mut self) -> f64 {
        self.0
    }
}
