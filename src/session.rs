//! Session lifecycle
//!
//! `Session` is the single owner of the simulation: it maps input events to
//! phase transitions, drives one tick per frame while running, and hands a
//! read-only view to whoever draws.

use rand_pcg::Pcg32;

use crate::platform::{Driver, FrameHost};
use crate::sim::{
    Cloud, GameEvent, GameState, Obstacle, Particle, Player, RandomSource, jump, seeded_rng, tick,
};
use crate::tuning::Tuning;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Start screen, nothing simulated yet
    Idle,
    /// Frames are being simulated
    Running,
    /// Suspended by the player; no time passes
    Paused,
    /// Player crashed; waiting for a restart
    GameOver,
}

/// Discrete input delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    TogglePause,
    StartOrRestart,
}

/// Everything a renderer may read for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: SessionPhase,
    pub score: u32,
    pub elapsed: f32,
    pub scroll_speed: f32,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub clouds: &'a [Cloud],
    pub particles: &'a [Particle],
    pub ground_scroll: f32,
}

/// One player's run of games
#[derive(Debug)]
pub struct Session<H: FrameHost, R: RandomSource = Pcg32> {
    phase: SessionPhase,
    state: GameState,
    tuning: Tuning,
    seed: u64,
    rng: R,
    driver: Driver<H>,
}

impl<H: FrameHost> Session<H, Pcg32> {
    /// Session with a seeded PCG generator
    pub fn new(host: H, tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(host, tuning, seed, seeded_rng(seed))
    }
}

impl<H: FrameHost, R: RandomSource> Session<H, R> {
    /// Session drawing from a caller-supplied random source
    pub fn with_rng(host: H, tuning: Tuning, seed: u64, mut rng: R) -> Self {
        let state = GameState::new(seed, &tuning, &mut rng);
        Self {
            phase: SessionPhase::Idle,
            state,
            tuning,
            seed,
            rng,
            driver: Driver::new(host),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and debugging
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn driver(&self) -> &Driver<H> {
        &self.driver
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.driver.host_mut()
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            score: self.state.score,
            elapsed: self.state.elapsed,
            scroll_speed: self.state.scroll_speed,
            player: &self.state.player,
            obstacles: &self.state.obstacles,
            clouds: &self.state.clouds,
            particles: &self.state.particles,
            ground_scroll: self.state.ground_scroll,
        }
    }

    /// Apply an input event; returns false when the event was ignored
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match (self.phase, event) {
            (SessionPhase::Idle | SessionPhase::GameOver, InputEvent::StartOrRestart) => {
                self.restart();
                true
            }
            (SessionPhase::Running, InputEvent::Jump) => {
                match jump(&mut self.state, &self.tuning, &mut self.rng) {
                    Some(_) => {
                        log::trace!("Jump at t={:.2}", self.state.elapsed);
                        true
                    }
                    None => false,
                }
            }
            (SessionPhase::Running, InputEvent::TogglePause) => {
                self.set_phase(SessionPhase::Paused);
                true
            }
            (SessionPhase::Paused, InputEvent::TogglePause) => {
                self.set_phase(SessionPhase::Running);
                true
            }
            _ => false,
        }
    }

    /// Host frame callback; runs one tick while running
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.phase != SessionPhase::Running {
            return Vec::new();
        }

        let dt = self.driver.frame_fired(now_ms);
        let events = tick(&mut self.state, &self.tuning, dt, &mut self.rng);

        let mut crashed = false;
        for event in &events {
            match *event {
                GameEvent::ObstacleSpawned { id, height } => {
                    log::trace!("Spawned obstacle {} (height {:.0})", id, height);
                }
                GameEvent::ObstaclePassed { id } => {
                    log::debug!("Passed obstacle {}, score {}", id, self.state.score);
                }
                GameEvent::SpeedUp { level, speed } => {
                    log::info!("Speed up: level {} ({:.0} units/s)", level, speed);
                }
                GameEvent::Crashed { id } => {
                    log::info!(
                        "Game over: hit obstacle {} with score {}",
                        id,
                        self.state.score
                    );
                    crashed = true;
                }
                GameEvent::Jumped => {}
            }
        }

        if crashed {
            self.set_phase(SessionPhase::GameOver);
        } else {
            self.driver.schedule();
        }
        events
    }

    /// Host is going away: stop the loop and return to the start screen
    pub fn shutdown(&mut self) {
        self.set_phase(SessionPhase::Idle);
        self.driver.stop();
    }

    /// Fresh game state and straight into Running
    fn restart(&mut self) {
        self.state = GameState::new(self.seed, &self.tuning, &mut self.rng);
        log::info!("Session started with seed: {}", self.seed);
        self.set_phase(SessionPhase::Running);
    }

    /// Single path for phase changes; leaving Running always stops the driver
    fn set_phase(&mut self, next: SessionPhase) {
        let previous = self.phase;
        if previous == next {
            return;
        }
        if previous == SessionPhase::Running {
            self.driver.stop();
        }
        self.phase = next;
        if next == SessionPhase::Running {
            self.driver.start();
        }
        log::debug!("Phase {:?} -> {:?}", previous, next);
    }
}
