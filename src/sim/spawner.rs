//! Obstacle spawn timing

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::tuning::Tuning;

/// Accumulates time and fires after a randomized delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Time since the last spawn (seconds)
    pub timer: f32,
    /// Threshold for the next spawn (seconds)
    pub next_delay: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning, rng: &mut dyn RandomSource) -> Self {
        Self {
            timer: 0.0,
            next_delay: Self::draw_delay(tuning, rng),
        }
    }

    /// Fresh delay, independent of earlier draws
    pub fn draw_delay(tuning: &Tuning, rng: &mut dyn RandomSource) -> f32 {
        rng.range(tuning.spawn_delay_min, tuning.spawn_delay_max) / tuning.game_speed
    }

    /// Advance by `dt`; returns true when an obstacle should spawn this tick
    pub fn update(&mut self, dt: f32, tuning: &Tuning, rng: &mut dyn RandomSource) -> bool {
        self.timer += dt;
        if self.timer > self.next_delay {
            self.timer = 0.0;
            self.next_delay = Self::draw_delay(tuning, rng);
            true
        } else {
            false
        }
    }
}
