//! Collision detection against asteroids
//!
//! Two phases. The broad phase is a padded bounding-circle rejection over the
//! live asteroid set. The narrow phase is exact and treats the asteroid outline
//! as a fan of 12 triangles, each spanned by the asteroid center and two
//! consecutive (wrapping) outline vertices:
//!
//! - point form, for bullets: barycentric containment in any fan triangle
//! - segment form, for the ship hull: does the segment `b + t·m`, `t ∈ [0, 1]`,
//!   pass through any fan triangle
//!
//! A fan triangle whose edges are collinear (`cross(v1, v2) == 0`) has no
//! area and never reports a hit.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::geom::cross;
use super::shape::OUTLINE_VERTICES;

/// Anything that can be tested against the asteroid set
pub trait Collider {
    /// Position used for the broad phase
    fn position(&self) -> Vec2;

    /// Extra reach added to the asteroid's weak radius in the broad phase
    fn padding(&self) -> f32;

    /// Exact test against a single asteroid
    fn hits(&self, asteroid: &Asteroid) -> bool;
}

/// A line segment `start + t * delta`, `t ∈ [0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub delta: Vec2,
}

impl Segment {
    pub fn between(a: Vec2, b: Vec2) -> Self {
        Self {
            start: a,
            delta: b - a,
        }
    }

    pub fn end(&self) -> Vec2 {
        self.start + self.delta
    }
}

/// Broad phase, then narrow phase, over the live asteroids.
///
/// Returns the index of the first asteroid the asset actually hits.
pub fn weak_test<C: Collider + ?Sized>(asset: &C, asteroids: &[Asteroid]) -> Option<usize> {
    let pos = asset.position();
    let padding = asset.padding();
    asteroids.iter().position(|asteroid| {
        let reach = asteroid.weak_radius() + padding;
        pos.distance_squared(asteroid.broad_center()) <= reach * reach && asset.hits(asteroid)
    })
}

/// Fan triangle `i` of an asteroid, in asteroid-local world units
#[inline]
fn fan_edges(asteroid: &Asteroid, i: usize) -> (Vec2, Vec2) {
    (
        asteroid.outline.vertex(i) * asteroid.size,
        asteroid.outline.vertex(i + 1) * asteroid.size,
    )
}

/// Is the displacement `d` inside the triangle (0, v1, v2)?
pub fn point_in_triangle(v1: Vec2, v2: Vec2, d: Vec2) -> bool {
    let denom = cross(v1, v2);
    if denom == 0.0 {
        log::trace!("degenerate fan triangle skipped in point test");
        return false;
    }
    let c1 = cross(d, v2) / denom;
    let c2 = cross(v1, d) / denom;
    c1 >= 0.0 && c2 >= 0.0 && c1 + c2 <= 1.0
}

/// Does the segment (in triangle-local space) pass through the triangle (0, v1, v2)?
///
/// The barycentric weights of `b + t·m` are affine in `t`. Each weight being
/// non-negative confines `t` to a half-line; the segment intercepts the
/// triangle iff the three half-lines and `[0, 1]` share an open interval.
/// Fans wound clockwise (`cross(v1, v2) < 0`) flip every inequality, which is
/// the same as negating all coefficients.
pub fn segment_hits_triangle(v1: Vec2, v2: Vec2, segment: Segment) -> bool {
    let denom = cross(v1, v2);
    if denom == 0.0 {
        log::trace!("degenerate fan triangle skipped in segment test");
        return false;
    }
    let b = segment.start;
    let m = segment.delta;

    // Weights scaled by `denom`; c3 makes the three sum to `denom`.
    let a1 = cross(b, v2);
    let b1 = cross(m, v2);
    let a2 = cross(v1, b);
    let b2 = cross(v1, m);
    let a3 = denom - a1 - a2;
    let b3 = -(b1 + b2);

    let sign = denom.signum();
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    for (alpha, beta) in [(a1, b1), (a2, b2), (a3, b3)] {
        let (alpha, beta) = (alpha * sign, beta * sign);
        if beta > 0.0 {
            lo = lo.max(-alpha / beta);
        } else if beta < 0.0 {
            hi = hi.min(-alpha / beta);
        } else if alpha < 0.0 {
            return false;
        }
    }
    lo < hi
}

/// Is the world point inside the asteroid outline?
pub fn point_in_asteroid(asteroid: &Asteroid, point: Vec2) -> bool {
    let d = point - asteroid.pos;
    (0..OUTLINE_VERTICES).any(|i| {
        let (v1, v2) = fan_edges(asteroid, i);
        point_in_triangle(v1, v2, d)
    })
}

/// Does the world segment pass through the asteroid outline?
pub fn segment_hits_asteroid(asteroid: &Asteroid, segment: Segment) -> bool {
    let local = Segment {
        start: segment.start - asteroid.pos,
        delta: segment.delta,
    };
    (0..OUTLINE_VERTICES).any(|i| {
        let (v1, v2) = fan_edges(asteroid, i);
        segment_hits_triangle(v1, v2, local)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::{Bounds, Outline};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Regular 12-gon of unit-box radius 0.5
    fn regular_asteroid(pos: Vec2, size: f32) -> Asteroid {
        let mut vertices = [Vec2::ZERO; OUTLINE_VERTICES];
        for (i, v) in vertices.iter_mut().enumerate() {
            *v = crate::polar_to_cartesian(0.5, i as f32 * std::f32::consts::FRAC_PI_6);
        }
        Asteroid {
            pos,
            vel: Vec2::ZERO,
            size,
            outline: Outline {
                vertices,
                bounds: Bounds {
                    radius: 1.0,
                    offset: Vec2::ZERO,
                },
            },
        }
    }

    struct PointCollider(Vec2);

    impl Collider for PointCollider {
        fn position(&self) -> Vec2 {
            self.0
        }
        fn padding(&self) -> f32 {
            2.0
        }
        fn hits(&self, asteroid: &Asteroid) -> bool {
            point_in_asteroid(asteroid, self.0)
        }
    }

    #[test]
    fn test_center_always_contained() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let asteroid = Asteroid::new(Vec2::new(40.0, 60.0), Vec2::ZERO, 16.0, &mut rng);
            assert!(point_in_asteroid(&asteroid, asteroid.pos));
        }
    }

    #[test]
    fn test_far_point_never_contained() {
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..200 {
            let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 16.0, &mut rng);
            let far = asteroid.broad_center() + Vec2::new(asteroid.weak_radius() + 10.0, 0.0);
            assert!(!point_in_asteroid(&asteroid, far));
        }
    }

    #[test]
    fn test_point_containment_regular_polygon() {
        let asteroid = regular_asteroid(Vec2::new(50.0, 50.0), 16.0);
        // apothem of the size-16 polygon is 8 * cos(15°) ≈ 7.73
        assert!(point_in_asteroid(&asteroid, Vec2::new(57.0, 50.0)));
        assert!(point_in_asteroid(&asteroid, Vec2::new(50.0, 43.0)));
        assert!(!point_in_asteroid(&asteroid, Vec2::new(58.5, 50.0)));
        assert!(!point_in_asteroid(&asteroid, Vec2::new(50.0, 58.5)));
    }

    #[test]
    fn test_degenerate_triangle_is_no_hit() {
        let v1 = Vec2::new(1.0, 1.0);
        let v2 = Vec2::new(2.0, 2.0);
        assert!(!point_in_triangle(v1, v2, Vec2::ZERO));
        assert!(!segment_hits_triangle(
            v1,
            v2,
            Segment::between(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0))
        ));
    }

    #[test]
    fn test_zero_length_segment_matches_point_test() {
        let triangles = [
            (Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)),
            // clockwise winding
            (Vec2::new(0.0, 4.0), Vec2::new(4.0, 0.0)),
        ];
        let points = [
            Vec2::new(1.0, 1.0),
            Vec2::new(0.5, 2.5),
            Vec2::new(3.0, 3.0),
            Vec2::new(-0.5, 1.0),
            Vec2::new(1.0, -0.5),
            Vec2::new(10.0, 0.2),
        ];
        for (v1, v2) in triangles {
            for p in points {
                let seg = Segment {
                    start: p,
                    delta: Vec2::ZERO,
                };
                assert_eq!(
                    segment_hits_triangle(v1, v2, seg),
                    point_in_triangle(v1, v2, p),
                    "point {p:?} against ({v1:?}, {v2:?})"
                );
            }
        }
    }

    #[test]
    fn test_segment_crossing_triangle_without_endpoints_inside() {
        let v1 = Vec2::new(4.0, 0.0);
        let v2 = Vec2::new(0.0, 4.0);
        // passes straight through, both ends outside
        let through = Segment::between(Vec2::new(-2.0, 1.0), Vec2::new(6.0, 1.0));
        assert!(!point_in_triangle(v1, v2, through.start));
        assert!(!point_in_triangle(v1, v2, through.end()));
        assert!(segment_hits_triangle(v1, v2, through));
        // reversed winding must agree
        assert!(segment_hits_triangle(v2, v1, through));
        // runs parallel beyond the hypotenuse
        let miss = Segment::between(Vec2::new(-1.0, 7.0), Vec2::new(7.0, -1.0));
        assert!(!segment_hits_triangle(v1, v2, miss));
    }

    #[test]
    fn test_segment_stopping_short() {
        let v1 = Vec2::new(4.0, 0.0);
        let v2 = Vec2::new(0.0, 4.0);
        let short = Segment::between(Vec2::new(-3.0, 1.0), Vec2::new(-1.0, 1.0));
        assert!(!segment_hits_triangle(v1, v2, short));
    }

    #[test]
    fn test_segment_through_asteroid() {
        let asteroid = regular_asteroid(Vec2::new(50.0, 50.0), 8.0);
        let across = Segment::between(Vec2::new(40.0, 50.0), Vec2::new(60.0, 50.0));
        assert!(segment_hits_asteroid(&asteroid, across));
        let beside = Segment::between(Vec2::new(40.0, 58.0), Vec2::new(60.0, 58.0));
        assert!(!segment_hits_asteroid(&asteroid, beside));
    }

    #[test]
    fn test_weak_test_returns_first_hit() {
        let asteroids = vec![
            regular_asteroid(Vec2::new(10.0, 10.0), 8.0),
            regular_asteroid(Vec2::new(50.0, 50.0), 8.0),
            regular_asteroid(Vec2::new(51.0, 50.0), 8.0),
        ];
        assert_eq!(weak_test(&PointCollider(Vec2::new(50.5, 50.0)), &asteroids), Some(1));
        assert_eq!(weak_test(&PointCollider(Vec2::new(90.0, 90.0)), &asteroids), None);
    }
}
