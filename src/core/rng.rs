//! Seedable random number generation.
//!
//! Weight initialization, the random opponent and random board sampling all
//! draw from a `SeededRng`, so every run can be reproduced from its seed.
//!
//! ```
//! use ttt_nn::core::SeededRng;
//!
//! let mut a = SeededRng::new(7);
//! let mut b = SeededRng::new(7);
//! assert_eq!(a.gen_range_usize(0..9), b.gen_range_usize(0..9));
//!
//! // Independent streams for separate concerns
//! let root = SeededRng::new(7);
//! let _weights = root.for_context("weights");
//! let _opponent = root.for_context("opponent");
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a usize in `low..=high`.
    pub fn gen_inclusive_usize(&mut self, low: usize, high: usize) -> usize {
        self.inner.gen_range(low..=high)
    }

    /// Uniform real in `[low, high]`.
    pub fn gen_uniform(&mut self, low: f64, high: f64) -> f64 {
        self.inner.gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SeededRng::new(42);
        let mut rng2 = SeededRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(1);
        let mut rng2 = SeededRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams() {
        let rng = SeededRng::new(42);
        let mut weights = rng.for_context("weights");
        let mut opponent = rng.for_context("opponent");
        let mut weights_again = rng.for_context("weights");

        let a: Vec<_> = (0..10).map(|_| weights.gen_range_usize(0..1000)).collect();
        let b: Vec<_> = (0..10).map(|_| opponent.gen_range_usize(0..1000)).collect();
        let c: Vec<_> = (0..10).map(|_| weights_again.gen_range_usize(0..1000)).collect();

        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = SeededRng::new(3);
        for _ in 0..1000 {
            let w = rng.gen_uniform(-0.1, 0.1);
            assert!((-0.1..=0.1).contains(&w));
        }
        assert_eq!(rng.gen_uniform(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_inclusive_range() {
        let mut rng = SeededRng::new(9);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[rng.gen_inclusive_usize(0, 5)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
