//! Difficulty ramp: scroll speed steps up with session time

use crate::tuning::Tuning;

/// Number of completed ramp intervals at `elapsed`
pub fn ramp_level(tuning: &Tuning, elapsed: f32) -> u32 {
    (elapsed.max(0.0) / tuning.ramp_interval).floor() as u32
}

/// Scroll speed for the given session time (non-decreasing in `elapsed`)
pub fn scroll_speed(tuning: &Tuning, elapsed: f32) -> f32 {
    let level = ramp_level(tuning, elapsed) as f32;
    (tuning.base_speed + level * tuning.ramp_increment) * tuning.game_speed
}
