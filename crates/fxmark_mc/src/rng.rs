//! Seeded random number generation for path simulation.
//!
//! The original engine drew Box-Muller normals from an unseedable default
//! source, which made Monte-Carlo prices unreproducible. [`McRng`] wraps
//! a seedable PRNG behind a small interface so production code can run
//! from entropy while tests inject a fixed seed and get bit-identical
//! paths.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seedable normal-variate generator for Monte Carlo paths.
///
/// Standard normals are drawn with the ziggurat sampler from
/// `rand_distr::StandardNormal`, which replaces the original Box-Muller
/// transform with the same distribution and better throughput.
///
/// # Examples
///
/// ```
/// use fxmark_mc::rng::McRng;
///
/// let mut a = McRng::from_seed(42);
/// let mut b = McRng::from_seed(42);
/// assert_eq!(a.normal(), b.normal());
/// ```
pub struct McRng {
    inner: StdRng,
    seed: u64,
}

impl McRng {
    /// Creates a generator from an explicit seed.
    ///
    /// The same seed always yields the same variate sequence.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator seeded from OS entropy, remembering the seed
    /// so a run can be replayed.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::from_seed(seed)
    }

    /// Returns the seed this generator was built with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws one standard normal variate.
    #[inline]
    pub fn normal(&mut self) -> f64 {
        self.inner.sample(StandardNormal)
    }

    /// Derives an independent child generator for a path chunk.
    ///
    /// The derivation is a fixed function of the base seed and the chunk
    /// index, so a chunked simulation is deterministic regardless of how
    /// chunks are scheduled across threads.
    #[inline]
    pub fn child(&self, chunk_index: u64) -> Self {
        // SplitMix64-style odd multiplier keeps child seeds well spread.
        let child_seed = self
            .seed
            .wrapping_add(chunk_index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::from_seed(child_seed)
    }
}
