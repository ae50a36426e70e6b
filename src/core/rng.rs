//! The single random source for a session.
//!
//! Every random decision in combat goes through one `GameRng`:
//!
//! - deck shuffles and discard reshuffles
//! - `RandomEnemy` target selection
//! - initial minion count and summoned minion templates
//! - enemy intent rolls
//! - reward picks and enemy profile picks
//!
//! Centralising it means a test can pin the whole session by seed.
//!
//! ```
//! use deck_descent::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let (mut x, mut y) = ((0..30).collect::<Vec<_>>(), (0..30).collect::<Vec<_>>());
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 stream; the whole sequence follows from the seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Minion counts and similar small inclusive ranges.
    pub fn gen_range_inclusive(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// `true` with the given probability, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform permutation in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Uniform index below `len`, or `None` for an empty collection.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    /// Index picked in proportion to `weights`.
    ///
    /// Zero weights are never picked. `None` if the slice is empty, all
    /// zero, or holds a negative weight.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.inner))
    }
}
