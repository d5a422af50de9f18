//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of host concerns:
//! - Time comes in as `dt` seconds
//! - Randomness comes in through `RandomSource`
//! - Obstacles are kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod rect;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Resolution, obstacle_hitbox, player_hitbox, resolve};
pub use difficulty::{ramp_level, scroll_speed};
pub use rect::Rect;
pub use rng::{RandomSource, seeded_rng};
pub use spawner::Spawner;
pub use state::{Cloud, GameEvent, GameState, Obstacle, Particle, ParticleKind, Player};
pub use tick::{jump, tick};
