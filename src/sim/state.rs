//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in one [`GameState`] passed by
//! reference into each step. Each collection has a single owner: the asteroid
//! field, the bullet pool and the particle system are only changed through
//! their own methods.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidField;
use super::particles::ParticleSystem;
use super::projectile::BulletPool;
use super::ship::Ship;
use crate::consts::*;
use crate::platform::{Controller, TimerEvent};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; asteroids keep drifting
    GameOver,
}

/// Things that happened during a frame, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An asteroid was hit (and split if it was big enough)
    AsteroidDestroyed { size: f32, points: u64 },
    /// The ship crashed and will respawn
    ShipDestroyed { lives_left: u8 },
    /// The ship crashed on its last life
    GameOver,
    /// Fire was pressed with every bullet slot in use
    ShotDropped,
    /// Field cleared; a new wave spawned
    WaveStarted { wave: u32, asteroids: usize },
}

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Seeded RNG for shapes, spawns and fragmentation
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Waves cleared so far
    pub wave: u32,
    /// Sub-steps simulated
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: AsteroidField,
    pub bullets: BulletPool,
    /// Visual debris (not gameplay-affecting)
    pub particles: ParticleSystem,
}

impl GameState {
    /// Create a run from settings and spawn the first wave
    pub fn new(settings: Settings) -> Self {
        let mut state = Self::empty(settings);
        state.spawn_wave();
        state
    }

    /// A run with no asteroids yet, for hand-built scenarios
    pub fn empty(settings: Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Playing,
            score: 0,
            wave: 0,
            time_ticks: 0,
            ship: Ship::new(settings.starting_lives),
            asteroids: AsteroidField::new(),
            bullets: BulletPool::new(),
            particles: ParticleSystem::new().with_debug(settings.debug),
            settings,
        }
    }

    pub fn with_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.ship.controller = Some(controller);
        self
    }

    /// Where new waves spawn around: the ship during play, the field center otherwise
    pub fn population_center(&self) -> Vec2 {
        match self.phase {
            GamePhase::Playing => self.ship.pos,
            GamePhase::GameOver => Vec2::new(SHIP_SPAWN.0, SHIP_SPAWN.1),
        }
    }

    /// (Re)populate the field for the current wave
    pub fn spawn_wave(&mut self) -> usize {
        let count = self.settings.initial_asteroids + self.wave as usize;
        let center = self.population_center();
        self.asteroids
            .initialize(count, self.settings.asteroid_speed, center, &mut self.rng);
        count
    }

    /// Deliver a scheduled event
    pub fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ShipRespawn => {
                if self.phase == GamePhase::Playing {
                    self.ship.respawn();
                    log::info!("Ship respawned");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spawns_first_wave() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.asteroids.len(), Settings::default().initial_asteroids);
        assert_eq!(state.ship.lives, STARTING_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(Settings::default());
        let b = GameState::new(Settings::default());
        assert_eq!(a.asteroids.as_slice(), b.asteroids.as_slice());

        let c = GameState::new(Settings {
            seed: 1,
            ..Default::default()
        });
        assert_ne!(a.asteroids.as_slice(), c.asteroids.as_slice());
    }

    #[test]
    fn test_respawn_ignored_after_game_over() {
        let mut state = GameState::empty(Settings::default());
        state.ship.pause_drawing = true;
        state.phase = GamePhase::GameOver;
        state.handle_timer(TimerEvent::ShipRespawn);
        assert!(state.ship.pause_drawing);

        state.phase = GamePhase::Playing;
        state.handle_timer(TimerEvent::ShipRespawn);
        assert!(!state.ship.pause_drawing);
    }
}
