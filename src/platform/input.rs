//! Input mapping
//!
//! Raw host input becomes a `Control`; the session phase then decides which
//! `InputEvent` a control means.

use crate::session::{InputEvent, SessionPhase};

/// What the player pressed, independent of game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Space, ArrowUp or a click: start, restart or jump
    Primary,
    /// Escape
    Pause,
}

impl Control {
    /// The event this control means in the given phase
    pub fn to_event(self, phase: SessionPhase) -> Option<InputEvent> {
        match (self, phase) {
            (Control::Primary, SessionPhase::Idle | SessionPhase::GameOver) => {
                Some(InputEvent::StartOrRestart)
            }
            (Control::Primary, SessionPhase::Running) => Some(InputEvent::Jump),
            (Control::Pause, SessionPhase::Running | SessionPhase::Paused) => {
                Some(InputEvent::TogglePause)
            }
            _ => None,
        }
    }
}

/// Map a `KeyboardEvent.code` value
pub fn map_key(code: &str) -> Option<Control> {
    match code {
        "Space" | "ArrowUp" => Some(Control::Primary),
        "Escape" => Some(Control::Pause),
        _ => None,
    }
}

/// Map a `MouseEvent.button` value; only the main button counts
pub fn map_mouse_button(button: i16) -> Option<Control> {
    (button == 0).then_some(Control::Primary)
}
