//! Simulation tick
//!
//! Advances the game state by one frame's worth of time. Order matters:
//! motion, then spawning, then collision and scoring, then the speed ramp.

use glam::Vec2;

use super::collision::resolve;
use super::difficulty::{ramp_level, scroll_speed};
use super::physics::{
    advance_ground, integrate_player, scroll_clouds, scroll_obstacles, try_jump, update_particles,
};
use super::rng::RandomSource;
use super::state::{GameEvent, GameState, ParticleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds; returns what happened
///
/// A `Crashed` event is always the last event of its tick, and nothing else
/// is advanced after it.
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    dt: f32,
    rng: &mut dyn RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let speed = state.scroll_speed;

    // Motion
    integrate_player(&mut state.player, tuning.gravity, dt);
    scroll_obstacles(&mut state.obstacles, speed, dt);
    scroll_clouds(
        &mut state.clouds,
        speed * tuning.cloud_parallax,
        dt,
        tuning.cloud_respawn_spread,
        rng,
    );
    update_particles(&mut state.particles, dt);
    state.ground_scroll = advance_ground(state.ground_scroll, speed, dt);

    // Spawning
    if state.spawner.update(dt, tuning, rng) {
        let height = rng.range(tuning.obstacle_height_min, tuning.obstacle_height_max);
        let id = state.spawn_obstacle(tuning.obstacle_width, height);
        events.push(GameEvent::ObstacleSpawned { id, height });
    }

    // Collision and scoring
    let resolution = resolve(state, tuning.hitbox_inset);
    events.extend(
        resolution
            .passed
            .iter()
            .map(|&id| GameEvent::ObstaclePassed { id }),
    );
    if let Some(obstacle) = resolution.crashed {
        let origin = obstacle.bounds().center() - Vec2::splat(10.0);
        state.burst(origin, ParticleKind::Spark, tuning, rng);
        events.push(GameEvent::Crashed { id: obstacle.id });
        return events;
    }

    // Difficulty
    let previous_level = ramp_level(tuning, state.elapsed);
    state.elapsed += dt;
    let level = ramp_level(tuning, state.elapsed);
    state.scroll_speed = scroll_speed(tuning, state.elapsed);
    if level > previous_level {
        events.push(GameEvent::SpeedUp {
            level,
            speed: state.scroll_speed,
        });
    }

    events
}

/// Jump if the player is grounded, kicking up dust at their feet
pub fn jump(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) -> Option<GameEvent> {
    if !try_jump(&mut state.player, tuning.jump_velocity) {
        return None;
    }
    let feet = Vec2::new(state.player.x + state.player.width / 2.0, GROUND_Y);
    state.burst(feet, ParticleKind::Dust, tuning, rng);
    Some(GameEvent::Jumped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRng;
    use crate::sim::state::Obstacle;

    const DT: f32 = 1.0 / 60.0;

    fn setup(sample: f32) -> (GameState, Tuning, SequenceRng) {
        let tuning = Tuning::default();
        let mut rng = SequenceRng::constant(sample);
        let state = GameState::new(12345, &tuning, &mut rng);
        (state, tuning, rng)
    }

    #[test]
    fn test_zero_dt_moves_nothing() {
        let (mut state, tuning, mut rng) = setup(0.5);
        state.spawn_obstacle(15.0, 40.0);
        let before = state.clone();

        let events = tick(&mut state, &tuning, 0.0, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state.obstacles, before.obstacles);
        assert_eq!(state.player, before.player);
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_spawns_after_delay() {
        // Sample 0.0 → 0.8s delay, height 30
        let (mut state, tuning, mut rng) = setup(0.0);
        let mut spawned = Vec::new();
        for _ in 0..60 {
            for event in tick(&mut state, &tuning, DT, &mut rng) {
                if let GameEvent::ObstacleSpawned { id, height } = event {
                    spawned.push((id, height));
                }
            }
        }
        assert_eq!(spawned, vec![(1, 30.0)]);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].height, 30.0);
        assert!(state.obstacles[0].spawned_at > 0.75);
    }

    #[test]
    fn test_crash_ends_tick() {
        let (mut state, tuning, mut rng) = setup(0.5);
        state.obstacles.push(Obstacle {
            id: 99,
            x: 92.0,
            width: 15.0,
            height: 30.0,
            spawned_at: 0.0,
        });

        let events = tick(&mut state, &tuning, DT, &mut rng);
        assert_eq!(events.last(), Some(&GameEvent::Crashed { id: 99 }));
        // Elapsed time does not advance on the crash tick
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.particles.len(), tuning.particles_per_burst);
    }

    #[test]
    fn test_speed_up_event() {
        let (mut state, tuning, mut rng) = setup(0.5);
        state.elapsed = 4.99;
        // Keep the spawner quiet
        state.spawner.next_delay = 100.0;

        let events = tick(&mut state, &tuning, 0.02, &mut rng);
        assert_eq!(
            events,
            vec![GameEvent::SpeedUp {
                level: 1,
                speed: 225.0
            }]
        );
        assert_eq!(state.scroll_speed, 225.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let (mut state, tuning, mut rng) = setup(0.5);
        assert_eq!(jump(&mut state, &tuning, &mut rng), Some(GameEvent::Jumped));
        assert_eq!(state.player.velocity, tuning.jump_velocity);
        assert_eq!(state.particles.len(), tuning.particles_per_burst);

        tick(&mut state, &tuning, DT, &mut rng);
        let velocity = state.player.velocity;
        assert_eq!(jump(&mut state, &tuning, &mut rng), None);
        assert_eq!(state.player.velocity, velocity);
    }

    #[test]
    fn test_determinism() {
        use crate::sim::rng::seeded_rng;

        let tuning = Tuning::default();
        let mut rng1 = seeded_rng(99999);
        let mut rng2 = seeded_rng(99999);
        let mut state1 = GameState::new(99999, &tuning, &mut rng1);
        let mut state2 = GameState::new(99999, &tuning, &mut rng2);

        for i in 0..600 {
            if i % 45 == 0 {
                jump(&mut state1, &tuning, &mut rng1);
                jump(&mut state2, &tuning, &mut rng2);
            }
            let e1 = tick(&mut state1, &tuning, DT, &mut rng1);
            let e2 = tick(&mut state2, &tuning, DT, &mut rng2);
            assert_eq!(e1, e2);
            if e1.iter().any(|e| matches!(e, GameEvent::Crashed { .. })) {
                break;
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player, state2.player);
    }
}
