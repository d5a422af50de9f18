//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON override can retune the game
//! without a rebuild. On the web an override is read from LocalStorage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gameplay tuning (lengths in playfield units, times in seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Velocity set by a jump; negative is upward (units/s)
    pub jump_velocity: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Hitbox shrink on every side, for forgiving collisions
    pub hitbox_inset: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height_min: f32,
    pub obstacle_height_max: f32,
    pub spawn_delay_min: f32,
    pub spawn_delay_max: f32,

    // === Speed ===
    /// Scroll speed at the start of a session (units/s)
    pub base_speed: f32,
    /// Seconds between speed steps
    pub ramp_interval: f32,
    /// Speed added at each step (units/s)
    pub ramp_increment: f32,
    /// Global multiplier: scales scroll speed and divides spawn delays
    pub game_speed: f32,

    // === Decorations ===
    pub cloud_count: usize,
    /// Fraction of scroll speed applied to clouds
    pub cloud_parallax: f32,
    /// Extra distance past the right edge where wrapped clouds reappear
    pub cloud_respawn_spread: f32,
    pub particles_per_burst: usize,
    /// Max particle speed on each axis (units/s)
    pub particle_speed: f32,
    pub particle_life_min: f32,
    pub particle_life_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            jump_velocity: -450.0,
            player_x: 80.0,
            player_width: 35.0,
            player_height: 30.0,
            hitbox_inset: 5.0,

            obstacle_width: 15.0,
            obstacle_height_min: 30.0,
            obstacle_height_max: 80.0,
            spawn_delay_min: 0.8,
            spawn_delay_max: 1.4,

            base_speed: 200.0,
            ramp_interval: 5.0,
            ramp_increment: 25.0,
            game_speed: 1.0,

            cloud_count: 5,
            cloud_parallax: 0.3,
            cloud_respawn_spread: 200.0,
            particles_per_burst: 8,
            particle_speed: 100.0,
            particle_life_min: 0.5,
            particle_life_max: 1.0,
        }
    }
}

/// Why a tuning could not be used
#[derive(Debug)]
pub enum TuningError {
    /// The JSON text did not parse
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning JSON is malformed: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "tuning field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "minimum exceeds maximum",
        })
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_velocity",
                reason: "must be negative (upward)",
            });
        }
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        if !(self.hitbox_inset >= 0.0
            && 2.0 * self.hitbox_inset < self.player_width.min(self.player_height))
        {
            return Err(TuningError::Invalid {
                field: "hitbox_inset",
                reason: "must leave a non-empty hitbox",
            });
        }

        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_height_min", self.obstacle_height_min)?;
        ordered(
            "obstacle_height_max",
            self.obstacle_height_min,
            self.obstacle_height_max,
        )?;
        positive("spawn_delay_min", self.spawn_delay_min)?;
        ordered("spawn_delay_max", self.spawn_delay_min, self.spawn_delay_max)?;

        positive("base_speed", self.base_speed)?;
        positive("ramp_interval", self.ramp_interval)?;
        if !(self.ramp_increment.is_finite() && self.ramp_increment >= 0.0) {
            return Err(TuningError::Invalid {
                field: "ramp_increment",
                reason: "must not be negative",
            });
        }
        positive("game_speed", self.game_speed)?;

        positive("particle_life_min", self.particle_life_min)?;
        ordered(
            "particle_life_max",
            self.particle_life_min,
            self.particle_life_max,
        )?;
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cat_run_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 300.0, "game_speed": 2.0 }"#)
            .expect("valid override");
        assert_eq!(tuning.base_speed, 300.0);
        assert_eq!(tuning.game_speed, 2.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": -10.0 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "gravity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let tuning = Tuning {
            spawn_delay_min: 2.0,
            spawn_delay_max: 1.0,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("spawn_delay_max"));
    }

    #[test]
    fn test_rejects_oversized_inset() {
        let tuning = Tuning {
            hitbox_inset: 20.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            ramp_increment: 40.0,
            ..Default::default()
        };
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }
}
