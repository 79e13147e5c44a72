//! Uniform and ratio-weighted random booleans
//!
//! The simulation never reaches for a global engine: every call site takes a
//! [`BoolSource`], so runs can be seeded for reproducibility and a biased or
//! scripted source can stand in for the real one.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use shared::WEIGHT_EPSILON;

use crate::float_compare::{definitely_greater_than, definitely_less_than};

/// Source of raw coin outcomes
pub trait BoolSource {
    /// `true` or `false` with equal probability
    fn uniform_bool(&mut self) -> bool;

    /// `true` with probability `ratio`
    ///
    /// Ratios above 1 always yield `true`, ratios below 0 always yield `false`.
    fn weighted_bool(&mut self, ratio: f64) -> bool;
}

/// [`BoolSource`] backed by a `rand` engine
#[derive(Debug, Clone)]
pub struct RandomBool<R = StdRng> {
    rng: R,
}

impl RandomBool<StdRng> {
    /// Deterministic generator for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl RandomBool<ThreadRng> {
    /// Generator on the calling thread's lazily initialized engine
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> RandomBool<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BoolSource for RandomBool<R> {
    fn uniform_bool(&mut self) -> bool {
        self.rng.gen_range(0..=1u8) == 1
    }

    fn weighted_bool(&mut self, ratio: f64) -> bool {
        if definitely_greater_than(ratio, 1.0, WEIGHT_EPSILON) {
            return true;
        }
        if definitely_less_than(ratio, 0.0, WEIGHT_EPSILON) {
            return false;
        }
        let draw: f64 = self.rng.gen();
        definitely_less_than(draw, ratio, WEIGHT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIALS: usize = 1000;

    fn count_true(source: &mut impl BoolSource, ratio: f64, trials: usize) -> usize {
        (0..trials).filter(|_| source.weighted_bool(ratio)).count()
    }

    #[test]
    fn test_weighted_saturates_above_one() {
        let mut source = RandomBool::seeded(7);
        assert_eq!(count_true(&mut source, 1.1, TRIALS), TRIALS);
    }

    #[test]
    fn test_weighted_saturates_below_zero() {
        let mut source = RandomBool::seeded(7);
        assert_eq!(count_true(&mut source, -0.1, TRIALS), 0);
    }

    #[test]
    fn test_weighted_boundaries() {
        let mut source = RandomBool::seeded(11);
        // ratio 0 can never beat a non-negative draw
        assert_eq!(count_true(&mut source, 0.0, TRIALS), 0);
        // ratio 1 only loses to draws within epsilon of 1
        assert!(count_true(&mut source, 1.0, TRIALS) >= TRIALS - 10);
    }

    #[test]
    fn test_weighted_distribution() {
        let mut source = RandomBool::seeded(42);
        let trials = 20_000;
        let ratio = count_true(&mut source, 0.3, trials) as f64 / trials as f64;
        assert!(
            (ratio - 0.3).abs() < 0.02,
            "Weighted ratio {} is outside expected range",
            ratio
        );
    }

    #[test]
    fn test_uniform_distribution() {
        // Test that over many trials, the distribution is roughly 50/50
        let mut source = RandomBool::seeded(3);
        let trials = 10_000;
        let heads_count = (0..trials).filter(|_| source.uniform_bool()).count();
        let heads_ratio = heads_count as f64 / trials as f64;

        assert!(
            heads_ratio > 0.47 && heads_ratio < 0.53,
            "Heads ratio {} is outside expected range",
            heads_ratio
        );
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomBool::seeded(1234);
        let mut b = RandomBool::seeded(1234);
        let seq_a: Vec<bool> = (0..64).map(|_| a.uniform_bool()).collect();
        let seq_b: Vec<bool> = (0..64).map(|_| b.uniform_bool()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_thread_local_produces_both_outcomes() {
        let mut source = RandomBool::thread_local();
        let results: Vec<bool> = (0..200).map(|_| source.uniform_bool()).collect();
        assert!(results.contains(&true));
        assert!(results.contains(&false));
    }
}
