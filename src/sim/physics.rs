//! Kinematics for the player and everything that scrolls

use super::rng::RandomSource;
use super::state::{Cloud, Obstacle, Particle, Player};
use crate::consts::*;

/// Apply gravity and clamp to the ground
pub fn integrate_player(player: &mut Player, gravity: f32, dt: f32) {
    player.velocity += gravity * dt;
    player.offset = (player.offset + player.velocity * dt).min(0.0);
    if player.offset >= 0.0 {
        player.offset = 0.0;
        // Only a downward velocity lands; a fresh jump survives a zero-length frame
        if player.velocity > 0.0 {
            player.velocity = 0.0;
        }
    }
}

/// Launch the player if grounded; returns whether the jump happened
///
/// A jump already launched this frame (grounded but moving up) is not
/// relaunched.
pub fn try_jump(player: &mut Player, jump_velocity: f32) -> bool {
    if !player.is_grounded() || player.velocity < 0.0 {
        return false;
    }
    player.velocity = jump_velocity;
    true
}

/// Move obstacles left at the scroll speed
pub fn scroll_obstacles(obstacles: &mut [Obstacle], speed: f32, dt: f32) {
    for obstacle in obstacles {
        obstacle.x -= speed * dt;
    }
}

/// Move clouds left, wrapping those that leave the playfield
pub fn scroll_clouds(
    clouds: &mut [Cloud],
    speed: f32,
    dt: f32,
    respawn_spread: f32,
    rng: &mut dyn RandomSource,
) {
    for cloud in clouds {
        cloud.pos.x -= speed * dt;
        if cloud.pos.x + cloud.size * 2.0 < 0.0 {
            let x = PLAYFIELD_WIDTH + rng.range(0.0, respawn_spread);
            *cloud = Cloud::random_at(x, rng);
        }
    }
}

/// Move particles and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    particles.retain_mut(|p| {
        p.pos += p.vel * dt;
        p.life -= dt;
        p.life > 0.0
    });
}

/// Advance the ground stripe offset (scrolls at half speed)
pub fn advance_ground(ground_scroll: f32, speed: f32, dt: f32) -> f32 {
    let next = ground_scroll + speed * dt / 2.0;
    if next > GROUND_PATTERN_PERIOD {
        0.0
    } else {
        next
    }
}
