//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed sub-step only
//! - Seeded RNG only
//! - Stable iteration order (asteroids by insertion, bullets by slot)
//! - Drawing goes through a `RenderSink`, timers through a `Scheduler`

pub mod asteroid;
pub mod collision;
pub mod geom;
pub mod kinematics;
pub mod particles;
pub mod projectile;
pub mod shape;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidField, Impactor, split};
pub use collision::{
    Collider, Segment, point_in_asteroid, point_in_triangle, segment_hits_asteroid,
    segment_hits_triangle, weak_test,
};
pub use kinematics::{Motion, wrap, wrap_vec};
pub use particles::{Advance, Effect, EffectKind, EffectParams, ParticleSystem, RotatingSegment};
pub use projectile::{Bullet, BulletPool};
pub use shape::{Bounds, Outline};
pub use ship::{Destruction, Ship};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{collide, fire, frame, sub_step};
