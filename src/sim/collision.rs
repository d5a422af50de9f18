//! Collision detection and scoring
//!
//! The player's hitbox is inset from the sprite so near misses feel fair;
//! obstacles collide with their full bounds.

use super::rect::Rect;
use super::state::{GameState, Obstacle, Player};

/// Outcome of checking every obstacle for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// IDs of obstacles that left the playfield (each scored one point)
    pub passed: Vec<u32>,
    /// The obstacle the player ran into, if any
    pub crashed: Option<Obstacle>,
}

/// Forgiving hitbox for the player
pub fn player_hitbox(player: &Player, inset: f32) -> Rect {
    player.bounds().inset(inset)
}

/// Exact hitbox for an obstacle
pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    obstacle.bounds()
}

/// Check collisions, then retire exited obstacles and award points
///
/// Obstacles are walked in spawn order. Each one is tested for a hit before
/// it can be retired; the first hit ends the walk.
pub fn resolve(state: &mut GameState, hitbox_inset: f32) -> Resolution {
    let hitbox = player_hitbox(&state.player, hitbox_inset);
    let mut resolution = Resolution::default();

    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = state.obstacles[i];
        if hitbox.overlaps(&obstacle_hitbox(&obstacle)) {
            resolution.crashed = Some(obstacle);
            break;
        }
        if obstacle.has_exited() {
            state.obstacles.remove(i);
            resolution.passed.push(obstacle.id);
            continue;
        }
        i += 1;
    }

    state.score += resolution.passed.len() as u32;
    resolution
}
