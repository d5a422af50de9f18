//! Frame clock

use crate::consts::MAX_FRAME_DT;

/// Turns host timestamps (milliseconds) into simulation deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp; the next `advance` yields 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}
