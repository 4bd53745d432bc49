//! Fixed sub-step integrator with toroidal wraparound
//!
//! Each entity wraps on a world of width `PLAYFIELD + 2m`, where `m` is its
//! own wrap margin: it leaves the right edge at `PLAYFIELD + m` and comes back
//! in at `-m`. No internal randomness, so identical inputs give identical output.

use glam::Vec2;

use crate::consts::PLAYFIELD;

/// Per-entity motion parameters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    /// Constant acceleration over the step
    pub acc: Vec2,
    /// Linear drag coefficient (1/sec), zero for driftless bodies
    pub drag: f32,
    /// Wrap margin on each side of the playfield
    pub margin: f32,
}

impl Motion {
    /// Plain drift with no acceleration or drag
    pub fn drift(margin: f32) -> Self {
        Self {
            margin,
            ..Default::default()
        }
    }
}

/// Wrap one coordinate into `[-m, PLAYFIELD + m)`
#[inline]
pub fn wrap(p: f32, margin: f32) -> f32 {
    let width = PLAYFIELD + 2.0 * margin;
    let mut r = (p + PLAYFIELD + 3.0 * margin).rem_euclid(width);
    // rem_euclid can round up to exactly `width`
    if r >= width {
        r = 0.0;
    }
    r - margin
}

#[inline]
pub fn wrap_vec(p: Vec2, margin: f32) -> Vec2 {
    Vec2::new(wrap(p.x, margin), wrap(p.y, margin))
}

/// Advance one sub-step.
///
/// Position moves with the velocity held at the start of the step; velocity
/// then picks up acceleration and loses `drag * dt` of itself.
pub fn step(pos: &mut Vec2, vel: &mut Vec2, motion: Motion, dt: f32) {
    *pos = wrap_vec(*pos + *vel * dt, motion.margin);
    *vel += motion.acc * dt;
    if motion.drag != 0.0 {
        *vel -= *vel * (motion.drag * dt);
    }
}
