//! Deterministic RNG stream
//!
//! PCG32 behind a small value type. The stream is owned by the caller and
//! threaded through every generation call; nothing in this crate holds
//! ambient RNG state, so independently seeded streams can never interfere.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Caller-owned random stream for level generation.
///
/// Reproducible by construction: the same 32-bit seed yields the same
/// sequence of draws. Typically reseeded per level for variety, but a single
/// stream can also be carried across levels for replayable runs.
#[derive(Debug, Clone)]
pub struct GenRng {
    seed: u32,
    inner: Pcg32,
}

impl GenRng {
    /// Create a stream from a 32-bit seed (expanded to 64-bit PCG state).
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// The seed this stream was created from, for diagnostics/replay.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Next value in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform pick in [0, n). `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        ((self.next_f32() * n as f32) as usize).min(n - 1)
    }

    /// Uniform value in [lo, hi).
    #[inline]
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Fair coin flip.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.next_f32() > 0.5
    }
}
