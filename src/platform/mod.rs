//! Platform abstraction layer
//!
//! Handles the host side of the game loop:
//! - Time (frame timestamps to simulation `dt`)
//! - Frame scheduling and cancellation
//! - Input events (keys and mouse buttons to game controls)

pub mod driver;
pub mod input;
pub mod time;

pub use driver::{Driver, FrameHandle, FrameHost, RecordingHost};
pub use input::{Control, map_key, map_mouse_button};
pub use time::FrameClock;
