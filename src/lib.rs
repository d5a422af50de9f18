//! Cat Run - an endless runner in a fixed 800x240 playfield
//!
//! Core modules:
//! - `sim`: Simulation step (physics, spawning, collision, scoring, difficulty)
//! - `session`: Lifecycle state machine that owns the simulation
//! - `platform`: Frame clock, frame scheduling and input mapping
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{FrameView, InputEvent, Session, SessionPhase};
pub use tuning::{Tuning, TuningError};

/// Playfield and timing constants
pub mod consts {
    /// Logical playfield width
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    /// Logical playfield height
    pub const PLAYFIELD_HEIGHT: f32 = 240.0;
    /// Y coordinate of the ground line (y grows downward)
    pub const GROUND_Y: f32 = 180.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Period of the ground stripe pattern, in playfield units
    pub const GROUND_PATTERN_PERIOD: f32 = 40.0;
}
