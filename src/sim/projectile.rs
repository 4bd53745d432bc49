//! Bullets in flight
//!
//! A fixed ring buffer of `BULLET_POOL_CAPACITY` slots. One slot always stays
//! empty so `read == write` means empty and `write + 1 == read` means full.
//! Every bullet lives exactly `BULLET_LIFETIME` sub-steps, so bullets expire
//! in the order they were fired and the oldest is always at `read`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::collision::{Collider, point_in_asteroid};
use super::geom::dot;
use super::kinematics::{self, Motion};
use super::ship::Ship;
use crate::consts::*;
use crate::error::SimError;

const EXPLOSION_TICKS: u32 = BULLET_EXPLOSION_FRAMES * NUM_SUB_FRAMES;

/// A single bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sub-steps until the slot is freed
    pub lifetime: u32,
    /// Hit something; frozen in place while the impact plays
    pub collided: bool,
    /// Sub-steps since impact
    pub explosion_ticks: u32,
}

impl Bullet {
    /// Impact animation progress in `[0, 1]`, or `None` if not exploding or finished
    pub fn explosion_progress(&self) -> Option<f32> {
        (self.collided && self.explosion_ticks < EXPLOSION_TICKS)
            .then(|| self.explosion_ticks as f32 / EXPLOSION_TICKS as f32)
    }

    /// Mark as hit at the current position
    pub fn register_hit(&mut self) {
        self.collided = true;
        self.explosion_ticks = 0;
    }

    fn step(&mut self, dt: f32) {
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.collided {
            self.explosion_ticks = (self.explosion_ticks + 1).min(EXPLOSION_TICKS);
        } else {
            kinematics::step(&mut self.pos, &mut self.vel, Motion::drift(BULLET_MARGIN), dt);
        }
    }
}

impl Collider for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn padding(&self) -> f32 {
        BROAD_PHASE_PADDING
    }

    fn hits(&self, asteroid: &Asteroid) -> bool {
        point_in_asteroid(asteroid, self.pos)
    }
}

/// Ring buffer of live bullets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulletPool {
    slots: [Option<Bullet>; BULLET_POOL_CAPACITY],
    read: usize,
    write: usize,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn next(index: usize) -> usize {
        (index + 1) % BULLET_POOL_CAPACITY
    }

    pub fn len(&self) -> usize {
        (self.write + BULLET_POOL_CAPACITY - self.read) % BULLET_POOL_CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    pub fn is_full(&self) -> bool {
        Self::next(self.write) == self.read
    }

    /// Fire from the ship's nose.
    ///
    /// The ship's own speed along its heading adds to the muzzle speed and the
    /// ship is pushed back by a share of the bullet's velocity. A full pool
    /// refuses the shot; callers treat that as a dropped shot, not a failure.
    pub fn spawn(&mut self, ship: &mut Ship) -> Result<(), SimError> {
        if self.is_full() {
            return Err(SimError::PoolFull {
                capacity: BULLET_POOL_CAPACITY,
            });
        }

        let forward = ship.forward();
        let speed = BULLET_SPEED + dot(forward, ship.vel);
        let bullet = Bullet {
            pos: ship.pos + forward,
            vel: forward * speed,
            lifetime: BULLET_LIFETIME,
            collided: false,
            explosion_ticks: 0,
        };
        ship.vel -= bullet.vel * BULLET_RECOIL;

        self.slots[self.write] = Some(bullet);
        self.write = Self::next(self.write);
        Ok(())
    }

    /// Advance every live bullet one sub-step and free the expired ones
    pub fn update(&mut self, dt: f32) {
        for bullet in self.slots.iter_mut().flatten() {
            bullet.step(dt);
        }
        while !self.is_empty() {
            let expired = matches!(&self.slots[self.read], Some(bullet) if bullet.lifetime == 0);
            if !expired {
                break;
            }
            self.slots[self.read] = None;
            self.read = Self::next(self.read);
        }
    }

    /// Live bullets, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        let (read, len) = (self.read, self.len());
        (0..len).filter_map(move |i| self.slots[(read + i) % BULLET_POOL_CAPACITY].as_ref())
    }

    /// Live bullets in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bullet> {
        self.slots.iter_mut().flatten()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
