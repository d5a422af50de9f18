//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here. The state is
//! rebuilt wholesale when a session (re)starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::rng::RandomSource;
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground
    Jumped,
    /// New obstacle entered at the right edge
    ObstacleSpawned { id: u32, height: f32 },
    /// Obstacle left the playfield without a collision
    ObstaclePassed { id: u32 },
    /// Scroll speed stepped up
    SpeedUp { level: u32, speed: f32 },
    /// Player hit an obstacle
    Crashed { id: u32 },
}

/// The cat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal position of the sprite's left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Height above the ground; 0 = grounded, negative = airborne
    pub offset: f32,
    /// Vertical velocity; negative is upward
    pub velocity: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            width: tuning.player_width,
            height: tuning.player_height,
            offset: 0.0,
            velocity: 0.0,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.offset >= 0.0
    }

    /// Visual bounds of the sprite
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            GROUND_Y - self.height + self.offset,
            self.width,
            self.height,
        )
    }
}

/// A dog house standing on the ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Session time when it spawned (seconds)
    pub spawned_at: f32,
}

impl Obstacle {
    /// Visual bounds, anchored to the ground line
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, GROUND_Y - self.height, self.width, self.height)
    }

    /// Whole obstacle is left of the playfield
    #[inline]
    pub fn has_exited(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Background cloud
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
}

impl Cloud {
    /// Cloud at `x` with a fresh random height and size
    pub fn random_at(x: f32, rng: &mut dyn RandomSource) -> Self {
        let y = rng.range(30.0, 70.0);
        let size = rng.range(40.0, 80.0);
        Self {
            pos: Vec2::new(x, y),
            size,
        }
    }
}

/// Particle flavour, for color lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Kicked up by a jump
    Dust,
    /// Thrown off by a crash
    Spark,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime (seconds)
    pub life: f32,
    /// Initial lifetime, for fading
    pub max_life: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Opacity in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session RNG was created with (for logs and replays)
    pub seed: u64,
    /// Obstacles passed
    pub score: u32,
    /// Simulated session time (seconds); excludes paused time
    pub elapsed: f32,
    /// Current horizontal scroll speed (units/s)
    pub scroll_speed: f32,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Offset of the ground stripe pattern, in `[0, GROUND_PATTERN_PERIOD]`
    pub ground_scroll: f32,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Fresh session state
    pub fn new(seed: u64, tuning: &Tuning, rng: &mut dyn RandomSource) -> Self {
        let clouds = (0..tuning.cloud_count)
            .map(|i| Cloud::random_at(200.0 + i as f32 * 200.0, rng))
            .collect();

        Self {
            seed,
            score: 0,
            elapsed: 0.0,
            scroll_speed: tuning.base_speed * tuning.game_speed,
            player: Player::new(tuning),
            obstacles: Vec::new(),
            clouds,
            particles: Vec::new(),
            spawner: Spawner::new(tuning, rng),
            ground_scroll: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an obstacle entering at the right edge
    pub fn spawn_obstacle(&mut self, width: f32, height: f32) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            x: PLAYFIELD_WIDTH,
            width,
            height,
            spawned_at: self.elapsed,
        });
        id
    }

    /// Emit a burst of particles around `origin`
    pub fn burst(
        &mut self,
        origin: Vec2,
        kind: ParticleKind,
        tuning: &Tuning,
        rng: &mut dyn RandomSource,
    ) {
        for _ in 0..tuning.particles_per_burst {
            let pos = origin + Vec2::new(rng.range(0.0, 20.0), rng.range(0.0, 20.0));
            let vel = Vec2::new(
                rng.range(-tuning.particle_speed, tuning.particle_speed),
                rng.range(-tuning.particle_speed, tuning.particle_speed),
            );
            let max_life = rng.range(tuning.particle_life_min, tuning.particle_life_max);
            self.particles.push(Particle {
                pos,
                vel,
                life: max_life,
                max_life,
                kind,
            });
        }
    }
}
