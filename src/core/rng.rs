//! Random sources for dealing and AI decisions.
//!
//! ## Key Features
//!
//! - **Injectable**: setup and every AI decision take `&mut impl RandomSource`
//! - **Deterministic**: `GameRng` with the same seed produces the same match
//! - **Forkable**: independent, reproducible streams (one per simulated match)
//! - **Scriptable**: `ScriptedRandom` replays fixed values in tests
//!
//! ```
//! use verita_falso::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.below(100), b.below(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform randomness consumed by setup and the AI policies.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "below(0) has no valid result");
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform permutation (Fisher-Yates).
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.below(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Seeded match RNG.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG from OS entropy. The chosen seed is kept in `seed()`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

/// Replays a fixed sequence of `[0, 1)` values, cycling when exhausted.
///
/// ```
/// use verita_falso::core::{RandomSource, ScriptedRandom};
///
/// let mut rng = ScriptedRandom::new(vec![0.0, 0.99]);
/// assert!(rng.chance(0.01));
/// assert!(!rng.chance(0.5));
/// assert!(rng.chance(0.01)); // cycled back to 0.0
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Panics on an empty script.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "Script must contain at least one value");
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many values have been consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
