//! Procedural asteroid outlines
//!
//! Every outline is an irregular 12-gon in entity-local, unit-scaled
//! coordinates centred on the origin. Vertex `i` sits at angle
//! `(i + jitter - 0.5) * π/6` with a radial scale drawn from a bimodal
//! distribution, so midrange radii never occur and the rock looks spiky.

use std::f32::consts::FRAC_PI_6;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Number of outline vertices
pub const OUTLINE_VERTICES: usize = 12;

/// Local vertex distance is `OUTLINE_EXTENT * scale`, keeping the shape inside a unit box
pub const OUTLINE_EXTENT: f32 = 0.5;

/// Approximate bounding circle derived while the outline is generated.
///
/// `radius` is the running mean of the per-vertex radial scales and `offset`
/// the running mean of the vertices. It is a weak radius: spiky vertices
/// stick out past it, so broad-phase callers pad it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub radius: f32,
    pub offset: Vec2,
}

/// Immutable asteroid outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub vertices: [Vec2; OUTLINE_VERTICES],
    pub bounds: Bounds,
}

impl Outline {
    /// Generate a fresh outline, consuming randomness from `rng`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut vertices = [Vec2::ZERO; OUTLINE_VERTICES];
        let mut radius = 0.0;
        let mut offset = Vec2::ZERO;

        for (i, vertex) in vertices.iter_mut().enumerate() {
            let scale = spiky_scale(rng);
            let jitter: f32 = rng.random();
            let angle = (i as f32 + jitter - 0.5) * FRAC_PI_6;
            *vertex = polar_to_cartesian(OUTLINE_EXTENT * scale, angle);

            let n = (i + 1) as f32;
            radius += (scale - radius) / n;
            offset += (*vertex - offset) / n;
        }

        Self {
            vertices,
            bounds: Bounds { radius, offset },
        }
    }

    /// Vertex `i` wrapping around the outline
    #[inline]
    pub fn vertex(&self, i: usize) -> Vec2 {
        self.vertices[i % OUTLINE_VERTICES]
    }

    /// Flat `[x0, y0, x1, y1, ...]` form
    pub fn as_flat(&self) -> [f32; OUTLINE_VERTICES * 2] {
        let mut flat = [0.0; OUTLINE_VERTICES * 2];
        for (i, v) in self.vertices.iter().enumerate() {
            flat[2 * i] = v.x;
            flat[2 * i + 1] = v.y;
        }
        flat
    }
}

/// Radial scale in [0.30, 0.55) ∪ [0.65, 0.90)
fn spiky_scale<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random::<bool>() {
        rng.random_range(0.65..0.90)
    } else {
        rng.random_range(0.30..0.55)
    }
}
