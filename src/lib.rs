//! Roid Field - simulation core for a wraparound asteroid-field shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, asteroids, bullets, debris)
//! - `render`: Draw requests in normalized coordinates for an external renderer
//! - `platform`: Input decoding and timer abstraction
//! - `settings`: Data-driven configuration

pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield extent (square, arbitrary units)
    pub const PLAYFIELD: f32 = 100.0;
    /// Rendered frames per second
    pub const FRAME_RATE: u32 = 60;
    /// Kinematic sub-steps per rendered frame
    pub const NUM_SUB_FRAMES: u32 = 4;
    /// Rendered frame duration
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Fixed sub-step duration
    pub const SIM_DT: f32 = 1.0 / (FRAME_RATE * NUM_SUB_FRAMES) as f32;

    /// Ship wrap margin
    pub const SHIP_MARGIN: f32 = 2.0;
    /// Bullet wrap margin (bullets traverse further off-screen before wrapping)
    pub const BULLET_MARGIN: f32 = 10.0;

    /// Ship spawn point
    pub const SHIP_SPAWN: (f32, f32) = (50.0, 50.0);
    /// Rotation speed while a turn key is held (radians/sec)
    pub const SHIP_ROTATION_SPEED: f32 = 4.0;
    /// Thrust acceleration (units/sec²)
    pub const SHIP_THRUST: f32 = 30.0;
    /// Linear drag coefficient (1/sec)
    pub const SHIP_DRAG: f32 = 0.8;
    /// Time the ship stays down after destruction (ms)
    pub const SHIP_RESPAWN_DELAY_MS: u64 = 1500;
    /// Default number of lives
    pub const STARTING_LIVES: u8 = 3;

    /// Asteroid sizes: spawn size and the size at which fragmentation stops
    pub const ASTEROID_START_SIZE: f32 = 16.0;
    pub const ASTEROID_MIN_SIZE: f32 = 4.0;
    /// Sub-steps applied to fresh fragments so they separate before the next render
    pub const FRAGMENT_SEPARATION_STEPS: u32 = 8;
    /// Spawn ring around the population center
    pub const SPAWN_RADIUS_MIN: f32 = 15.0;
    pub const SPAWN_RADIUS_MAX: f32 = 60.0;

    /// Broad-phase padding on top of the asteroid's mean radius
    pub const BROAD_PHASE_PADDING: f32 = 2.0;

    /// Projectile ring buffer capacity (one slot is always left empty)
    pub const BULLET_POOL_CAPACITY: usize = 6;
    /// Base muzzle speed (units/sec)
    pub const BULLET_SPEED: f32 = 20.0;
    /// Fraction of the bullet velocity applied to the ship as recoil
    pub const BULLET_RECOIL: f32 = 0.05;
    /// Bullet lifetime in sub-steps
    pub const BULLET_LIFETIME: u32 = 180 * NUM_SUB_FRAMES;
    /// Frames the impact animation plays for
    pub const BULLET_EXPLOSION_FRAMES: u32 = 12;

    /// Frames hull debris stays on screen
    pub const DEBRIS_FRAMES: i32 = 45;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit forward vector for a heading. Heading 0 points up the screen (-y).
#[inline]
pub fn heading_to_forward(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
