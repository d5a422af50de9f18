//! Random number sources for the simulation
//!
//! Gameplay code never touches a concrete RNG; it draws through
//! `RandomSource` so tests can script exact sequences.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`; returns `lo` when the range is empty
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.unit()
    }
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Create the session RNG for a seed
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of unit samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRng {
    samples: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Samples are clamped into `[0, 1)`; an empty list behaves like `[0.0]`
    pub fn new(samples: &[f32]) -> Self {
        let samples = if samples.is_empty() {
            vec![0.0]
        } else {
            samples
                .iter()
                .map(|s| s.clamp(0.0, 1.0 - f32::EPSILON))
                .collect()
        };
        Self { samples, cursor: 0 }
    }

    /// Always yields the same sample
    pub fn constant(sample: f32) -> Self {
        Self::new(&[sample])
    }
}

impl RandomSource for SequenceRng {
    fn unit(&mut self) -> f32 {
        let sample = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        sample
    }
}
