//! The player's ship
//!
//! Two states: active, and a timed destroyed-pause after a crash. While
//! paused the ship is neither moved nor collision-checked and its controller
//! is suspended; the host's scheduler ends the pause.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::asteroid::Asteroid;
use super::collision::{Collider, Segment, segment_hits_asteroid};
use super::kinematics::{self, Motion};
use super::particles::{EffectKind, EffectParams, ParticleSystem};
use crate::consts::*;
use crate::platform::{ActiveInput, Controller, Scheduler, TimerEvent};
use crate::render::WHITE;
use crate::{heading_to_forward, normalize_angle};

/// Hull vertices at heading 0: nose, rear-left, rear-right
pub const HULL: [Vec2; 3] = [
    Vec2::new(0.0, -1.5),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
];
/// Farthest hull vertex from the ship's center
pub const HULL_REACH: f32 = 1.5;

/// Outward speed of hull debris
const DEBRIS_SPEED: f32 = 4.0;

/// What a crash did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destruction {
    /// Ship is down but will respawn
    LifeLost { lives_left: u8 },
    /// No lives left
    GameOver,
}

/// The player's ship
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Radians; 0 points up the screen
    pub heading: f32,
    pub is_accelerating: bool,
    /// Source of decoded input; a ship without one just drifts
    pub controller: Option<Box<dyn Controller>>,
    /// Destroyed-pause: no drawing, no motion, no collisions
    pub pause_drawing: bool,
    pub lives: u8,
}

impl std::fmt::Debug for Ship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ship")
            .field("pos", &self.pos)
            .field("vel", &self.vel)
            .field("heading", &self.heading)
            .field("pause_drawing", &self.pause_drawing)
            .field("lives", &self.lives)
            .field("controller", &self.controller.is_some())
            .finish()
    }
}

impl Ship {
    /// A fresh ship at `SHIP_SPAWN` (the playfield center, `(50, 50)`), heading up
    pub fn new(lives: u8) -> Self {
        Self {
            pos: Vec2::new(SHIP_SPAWN.0, SHIP_SPAWN.1),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            heading: 0.0,
            is_accelerating: false,
            controller: None,
            pause_drawing: false,
            lives,
        }
    }

    pub fn with_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.controller = Some(controller);
        self
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_to_forward(self.heading)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.pause_drawing
    }

    /// World-space hull vertices: nose, rear-left, rear-right
    pub fn hull(&self) -> [Vec2; 3] {
        let rot = Vec2::from_angle(self.heading);
        HULL.map(|v| self.pos + rot.rotate(v))
    }

    /// Left side, right side, back
    pub fn hull_edges(&self) -> [Segment; 3] {
        let [nose, left, right] = self.hull();
        [
            Segment::between(nose, left),
            Segment::between(nose, right),
            Segment::between(left, right),
        ]
    }

    /// Turn and set thrust from the held keys
    pub fn apply_input(&mut self, input: ActiveInput, dt: f32) {
        let turn = match (input.left, input.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.heading = normalize_angle(self.heading + turn * SHIP_ROTATION_SPEED * dt);
        self.is_accelerating = input.thrust;
        self.acc = if input.thrust {
            self.forward() * SHIP_THRUST
        } else {
            Vec2::ZERO
        };
    }

    /// Read the controller and advance one sub-step. Does nothing while paused.
    pub fn update(&mut self, dt: f32) {
        if self.pause_drawing {
            return;
        }
        if let Some(input) = self.controller.as_ref().map(|c| c.active_input()) {
            self.apply_input(input, dt);
        }
        let motion = Motion {
            acc: self.acc,
            drag: SHIP_DRAG,
            margin: SHIP_MARGIN,
        };
        kinematics::step(&mut self.pos, &mut self.vel, motion, dt);
    }

    /// Edge-triggered fire request from the controller
    pub fn wants_fire(&mut self) -> bool {
        if self.pause_drawing {
            return false;
        }
        self.controller
            .as_mut()
            .is_some_and(|controller| controller.take_fire())
    }

    /// Crash: scatter the hull as debris, go back to spawn and pause.
    ///
    /// Costs one life. With lives remaining a respawn is scheduled; at zero
    /// the run is over and the ship stays down.
    pub fn destroy<R: Rng + ?Sized>(
        &mut self,
        particles: &mut ParticleSystem,
        scheduler: &mut dyn Scheduler,
        rng: &mut R,
    ) -> Destruction {
        self.emit_debris(particles, rng);

        self.pos = Vec2::new(SHIP_SPAWN.0, SHIP_SPAWN.1);
        self.vel = Vec2::ZERO;
        self.acc = Vec2::ZERO;
        self.heading = 0.0;
        self.is_accelerating = false;
        self.pause_drawing = true;
        self.lives = self.lives.saturating_sub(1);

        if let Some(controller) = self.controller.as_mut() {
            controller.suspend();
        }

        if self.lives == 0 {
            log::info!("Ship destroyed, no lives left");
            Destruction::GameOver
        } else {
            let delay = Duration::from_millis(SHIP_RESPAWN_DELAY_MS);
            scheduler.schedule(delay, TimerEvent::ShipRespawn);
            log::info!("Ship destroyed, {} lives left", self.lives);
            Destruction::LifeLost {
                lives_left: self.lives,
            }
        }
    }

    /// End destroyed-pause and hand control back to the player
    pub fn respawn(&mut self) {
        self.pause_drawing = false;
        if let Some(controller) = self.controller.as_mut() {
            controller.resume();
        }
    }

    /// Five tumbling pieces: both sides split in half, plus the back
    fn emit_debris<R: Rng + ?Sized>(&self, particles: &mut ParticleSystem, rng: &mut R) {
        let [nose, left, right] = self.hull();
        let mid_left = (nose + left) / 2.0;
        let mid_right = (nose + right) / 2.0;
        let pieces = [
            (nose, mid_left),
            (mid_left, left),
            (nose, mid_right),
            (mid_right, right),
            (left, right),
        ];

        let kick_axis = self.forward().perp();
        for (a, b) in pieces {
            let pivot = (a + b) / 2.0;
            let outward = (pivot - self.pos).normalize_or_zero();
            let kick = kick_axis * rng.random_range(-0.5f32..0.5) * DEBRIS_SPEED;
            let direction: f32 = if rng.random::<bool>() { 1.0 } else { -1.0 };
            let spin = rng.random_range(2.0f32..6.0) * direction;
            let params = EffectParams {
                a,
                b,
                angular_vel: spin,
                vel: self.vel + outward * DEBRIS_SPEED + kick,
                frames_left: DEBRIS_FRAMES,
                color: WHITE,
            };
            // rejected requests are logged by the particle system
            let _ = particles.create(EffectKind::Segment.as_str(), params);
        }
    }
}

impl Collider for Ship {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn padding(&self) -> f32 {
        BROAD_PHASE_PADDING + HULL_REACH
    }

    fn hits(&self, asteroid: &Asteroid) -> bool {
        self.hull_edges()
            .iter()
            .any(|edge| segment_hits_asteroid(asteroid, *edge))
    }
}
