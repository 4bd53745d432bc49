//! Asteroids and the live asteroid population
//!
//! Asteroids come in three tiers (16 → 8 → 4). A hit on anything above the
//! minimum tier splits it into two half-size children; a hit on the minimum
//! tier just removes it.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::magnitude;
use super::kinematics::{self, Motion};
use super::shape::{OUTLINE_EXTENT, Outline};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Widest angle between a fragment and the blast direction
const SPLIT_SPREAD: f32 = 0.33 * PI;
/// Share of the impactor's velocity that feeds the blast and the fragments
const IMPACT_TRANSFER: f32 = 0.1;
/// Largest angle between a spawn's heading and its outward spawn direction
const SPAWN_HEADING_SPREAD: f32 = 0.75 * PI;

/// A single asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Linear scale of the outline (16, 8 or 4)
    pub size: f32,
    pub outline: Outline,
}

impl Asteroid {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, vel: Vec2, size: f32, rng: &mut R) -> Self {
        Self {
            pos,
            vel,
            size,
            outline: Outline::generate(rng),
        }
    }

    /// Center of the broad-phase circle
    #[inline]
    pub fn broad_center(&self) -> Vec2 {
        self.pos + self.outline.bounds.offset * self.size
    }

    /// Mean radius scaled to world units; spiky vertices may poke past it
    #[inline]
    pub fn weak_radius(&self) -> f32 {
        self.outline.bounds.radius * OUTLINE_EXTENT * self.size
    }

    #[inline]
    pub fn wrap_margin(&self) -> f32 {
        self.size / 2.0
    }

    /// World-space outline vertices
    pub fn world_outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.outline
            .vertices
            .iter()
            .map(move |v| self.pos + *v * self.size)
    }

    pub fn step(&mut self, dt: f32) {
        let motion = Motion::drift(self.wrap_margin());
        kinematics::step(&mut self.pos, &mut self.vel, motion, dt);
    }

    /// Whether a hit produces children
    #[inline]
    pub fn can_split(&self) -> bool {
        self.size > ASTEROID_MIN_SIZE
    }

    /// Score for destroying this asteroid
    pub fn points(&self) -> u64 {
        if self.size >= ASTEROID_START_SIZE {
            20
        } else if self.size > ASTEROID_MIN_SIZE {
            50
        } else {
            100
        }
    }
}

/// Whatever struck an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impactor {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Split `parent` into two half-size children, or nothing at the minimum tier.
///
/// Both children get the parent's velocity, the blast (pointing from the
/// impactor to the asteroid) rotated by `±θ`, and a tenth of the impactor's
/// velocity. They are advanced a few sub-steps so they are already apart
/// when next drawn.
pub fn split<R: Rng + ?Sized>(
    parent: &Asteroid,
    impactor: Impactor,
    rng: &mut R,
) -> Option<[Asteroid; 2]> {
    if !parent.can_split() {
        return None;
    }

    let blast = (parent.pos - impactor.pos).normalize_or_zero()
        * (IMPACT_TRANSFER * magnitude(impactor.vel));
    let theta = rng.random_range(0.0..SPLIT_SPREAD);
    let carry = impactor.vel * IMPACT_TRANSFER;
    let size = parent.size / 2.0;

    let mut children = [theta, -theta].map(|angle| {
        let vel = parent.vel + Vec2::from_angle(angle).rotate(blast) + carry;
        Asteroid::new(parent.pos, vel, size, &mut *rng)
    });
    for child in &mut children {
        for _ in 0..FRAGMENT_SEPARATION_STEPS {
            child.step(SIM_DT);
        }
    }
    Some(children)
}

/// The live asteroid set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AsteroidField {
    asteroids: Vec<Asteroid>,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the field and spawn `count` asteroids around `center`.
    ///
    /// Spawn angles climb around the center like a spiral; each asteroid sits
    /// 15-60 units out and heads off within ±135° of straight outward, so
    /// nothing spawns aimed dead at the center.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        speed: f32,
        center: Vec2,
        rng: &mut R,
    ) {
        self.asteroids.clear();
        if count == 0 {
            return;
        }

        let slice = TAU / count as f32;
        let mut angle: f32 = rng.random_range(0.0..TAU);
        for _ in 0..count {
            angle += slice + rng.random_range(0.0..slice * 0.5);
            let radius = rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
            let heading = angle + rng.random_range(-SPAWN_HEADING_SPREAD..=SPAWN_HEADING_SPREAD);

            let pos = center + polar_to_cartesian(radius, angle);
            let vel = polar_to_cartesian(speed, heading);
            let mut asteroid = Asteroid::new(pos, vel, ASTEROID_START_SIZE, rng);
            asteroid.step(SIM_DT);
            self.asteroids.push(asteroid);
        }
        log::info!(
            "Spawned {} asteroids around ({:.1}, {:.1})",
            count,
            center.x,
            center.y
        );
    }

    pub fn as_slice(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asteroid> {
        self.asteroids.iter()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn insert(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    /// Remove a hit asteroid (preserves the order of the rest)
    pub fn remove(&mut self, index: usize) -> Asteroid {
        self.asteroids.remove(index)
    }

    /// Replace a removed asteroid with its fragments; returns how many were added
    pub fn break_apart<R: Rng + ?Sized>(
        &mut self,
        hit: &Asteroid,
        impactor: Impactor,
        rng: &mut R,
    ) -> usize {
        match split(hit, impactor, rng) {
            Some(children) => {
                log::trace!("size {} asteroid split", hit.size);
                self.asteroids.extend(children);
                2
            }
            None => 0,
        }
    }

    pub fn step(&mut self, dt: f32) {
        for asteroid in &mut self.asteroids {
            asteroid.step(dt);
        }
    }
}
