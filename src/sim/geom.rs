//! 2-D vector primitives used by the narrow phase

use glam::Vec2;

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.dot(b)
}

/// Scalar 2-D cross product: `a.x * b.y - a.y * b.x`
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}
