//! Seeded randomness for shuffles, room codes and AI choices.
//!
//! A registry owns one root `GameRng`. Each room gets its own stream split
//! off the root, and room codes come from a labelled side stream, so a fixed
//! seed replays the same codes, decks and AI decisions.
//!
//! ```
//! use bugsquash::core::GameRng;
//!
//! let mut root = GameRng::new(42);
//! let mut first = root.split();
//! let mut replay = GameRng::new(42).split();
//!
//! assert_eq!(first.below(1_000_000), replay.below(1_000_000));
//! ```

use std::hash::{Hash, Hasher};

use im::Vector;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// ChaCha8 stream that remembers its seed.
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

    /// Seeded from the operating system, for registries without a fixed seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off an independent stream, advancing this one.
    #[must_use]
    pub fn split(&mut self) -> Self {
        Self::new(self.inner.gen())
    }

    /// Stream derived from the seed and `label` alone.
    ///
    /// Does not advance `self`: the same label always yields the same stream.
    #[must_use]
    pub fn labelled(&self, label: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        self.inner.gen_range(0..n)
    }

    /// Collect `items` into a shuffled persistent vector.
    pub fn shuffled<T: Clone>(&mut self, items: impl IntoIterator<Item = T>) -> Vector<T> {
        let mut items: Vec<T> = items.into_iter().collect();
        items.shuffle(&mut self.inner);
        items.into_iter().collect()
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Index drawn in proportion to `weights`.
    ///
    /// `None` when the weights are empty, negative or all zero.
    pub fn pick_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.inner))
    }
}
