//! Per-entity draw requests

use glam::Vec2;

use super::{
    AMBER, Color, DEBUG_GREEN, DEBUG_RED, RenderSink, Stroke, WHITE, to_screen, to_screen_len,
};
use crate::consts::BROAD_PHASE_PADDING;
use crate::sim::collision::Collider;
use crate::sim::projectile::Bullet;
use crate::sim::ship::Ship;
use crate::sim::state::GameState;

const LINE_WIDTH: f32 = 0.25;
const BULLET_RADIUS: f32 = 0.3;
/// Radius the impact ring grows to over the explosion
const BLAST_RADIUS: f32 = 1.8;
const AXIS_LENGTH: f32 = 4.0;

/// Flame behind the hull at heading 0: rear-left, tip, rear-right
const FLAME: [Vec2; 3] = [
    Vec2::new(-0.5, 1.0),
    Vec2::new(0.0, 2.2),
    Vec2::new(0.5, 1.0),
];

fn line() -> Stroke {
    Stroke::new(WHITE, to_screen_len(LINE_WIDTH))
}

fn overlay(color: Color) -> Stroke {
    Stroke::new(color, to_screen_len(LINE_WIDTH * 0.5))
}

fn circle(sink: &mut dyn RenderSink, center: Vec2, radius: f32, stroke: Stroke) {
    let r = to_screen_len(radius);
    sink.ellipse(to_screen(center), Vec2::splat(r), stroke);
}

/// One render pass over the whole state.
///
/// Particles are advanced here, once per rendered frame, since effects are
/// frame-paced rather than sub-step-paced.
pub fn draw_frame(state: &mut GameState, sink: &mut dyn RenderSink) {
    for asteroid in state.asteroids.iter() {
        let points: Vec<Vec2> = asteroid.world_outline().map(to_screen).collect();
        sink.polyline(&points, true, line());
    }

    if state.ship.is_active() {
        draw_ship(&state.ship, sink);
    }

    for bullet in state.bullets.iter() {
        draw_bullet(bullet, sink);
    }

    state.particles.draw_all(sink);

    if state.settings.debug {
        draw_overlays(state, sink);
    }
}

fn draw_ship(ship: &Ship, sink: &mut dyn RenderSink) {
    let hull = ship.hull().map(to_screen);
    sink.polyline(&hull, true, line());

    if ship.is_accelerating {
        let rot = Vec2::from_angle(ship.heading);
        let flame = FLAME.map(|v| to_screen(ship.pos + rot.rotate(v)));
        sink.polyline(&flame, false, Stroke::new(AMBER, to_screen_len(LINE_WIDTH)));
    }
}

fn draw_bullet(bullet: &Bullet, sink: &mut dyn RenderSink) {
    if !bullet.collided {
        circle(sink, bullet.pos, BULLET_RADIUS, line());
        return;
    }
    if let Some(progress) = bullet.explosion_progress() {
        let radius = BULLET_RADIUS + (BLAST_RADIUS - BULLET_RADIUS) * progress;
        circle(sink, bullet.pos, radius, Stroke::new(AMBER, to_screen_len(LINE_WIDTH)));
    }
}

/// Broad-phase circles and the ship's forward axis
fn draw_overlays(state: &GameState, sink: &mut dyn RenderSink) {
    for asteroid in state.asteroids.iter() {
        let radius = asteroid.weak_radius() + BROAD_PHASE_PADDING;
        circle(sink, asteroid.broad_center(), radius, overlay(DEBUG_GREEN));
    }

    let ship = &state.ship;
    if ship.is_active() {
        circle(sink, ship.pos, ship.padding(), overlay(DEBUG_GREEN));
        let axis = [
            to_screen(ship.pos),
            to_screen(ship.pos + ship.forward() * AXIS_LENGTH),
        ];
        sink.polyline(&axis, false, overlay(DEBUG_RED));
    }
}
