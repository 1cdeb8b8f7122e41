//! Random number capability
//!
//! Every stochastic decision in the simulation goes through `RandomSource`
//! so a run can be replayed from a seed or driven by a fixed script.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Inclusive uniform integer draws
pub trait RandomSource {
    /// Uniform integer in `[low, high]`
    fn random_int(&mut self, low: i32, high: i32) -> i32;
}

/// Seeded PCG generator for reproducible runs
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn random_int(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Replays queued values, then answers every draw with the range maximum
///
/// Queued values are clamped into the requested range. With an empty queue no
/// one-in-N roll ever succeeds, which keeps scenario tests free of spawns.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    script: VecDeque<i32>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    /// Values not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRng {
    fn random_int(&mut self, low: i32, high: i32) -> i32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => high.max(low),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_determinism() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..500 {
            assert_eq!(a.random_int(0, 99), b.random_int(0, 99));
        }
    }

    #[test]
    fn test_seeded_bounds_inclusive() {
        let mut rng = SeededRng::new(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let v = rng.random_int(4, 8);
            assert!((4..=8).contains(&v));
            seen_low |= v == 4;
            seen_high |= v == 8;
        }
        assert!(seen_low && seen_high);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = SeededRng::new(1);
        assert_eq!(rng.random_int(3, 3), 3);
    }

    #[test]
    fn test_scripted_replay_and_fallback() {
        let mut rng = ScriptedRng::with_script([0, 50, -9]);
        assert_eq!(rng.random_int(0, 10), 0);
        assert_eq!(rng.random_int(0, 10), 10); // clamped
        assert_eq!(rng.random_int(-2, 2), -2); // clamped
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.random_int(4, 32), 32);
    }
}
