//! Fixed-step frame loop
//!
//! One rendered frame is: clear, draw, then `NUM_SUB_FRAMES` rounds of
//! kinematics followed by a collision pass. Nothing in here can fail a frame;
//! refused actions are reported as events and the frame carries on.

use super::asteroid::Impactor;
use super::collision::weak_test;
use super::state::{GameEvent, GamePhase, GameState};
use super::ship::Destruction;
use crate::consts::*;
use crate::platform::Scheduler;
use crate::render::{RenderSink, draw_frame};

/// Run one rendered frame
pub fn frame(
    state: &mut GameState,
    scheduler: &mut dyn Scheduler,
    sink: &mut dyn RenderSink,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    sink.clear();
    draw_frame(state, sink);

    for _ in 0..NUM_SUB_FRAMES {
        sub_step(state, &mut events);
        collide(state, scheduler, &mut events);
    }

    if state.phase == GamePhase::Playing && state.asteroids.is_empty() {
        state.wave += 1;
        let asteroids = state.spawn_wave();
        log::info!("Wave {} started with {} asteroids", state.wave, asteroids);
        events.push(GameEvent::WaveStarted {
            wave: state.wave,
            asteroids,
        });
    }

    events
}

/// Advance every moving thing by one sub-step, then take a pending shot
pub fn sub_step(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    state.ship.update(SIM_DT);
    state.asteroids.step(SIM_DT);
    state.bullets.update(SIM_DT);

    if state.phase == GamePhase::Playing && state.ship.wants_fire() {
        fire(state, events);
    }
}

/// Fire from the ship; a full pool drops the shot
pub fn fire(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if let Err(err) = state.bullets.spawn(&mut state.ship) {
        if state.settings.debug {
            log::debug!("shot dropped: {}", err);
        }
        events.push(GameEvent::ShotDropped);
    }
}

/// Test the ship and every flying bullet against the asteroid field
pub fn collide(state: &mut GameState, scheduler: &mut dyn Scheduler, events: &mut Vec<GameEvent>) {
    if state.phase == GamePhase::Playing && state.ship.is_active() {
        if let Some(index) = weak_test(&state.ship, state.asteroids.as_slice()) {
            let hit = state.asteroids.remove(index);
            let impactor = Impactor {
                pos: state.ship.pos,
                vel: state.ship.vel,
            };
            state.asteroids.break_apart(&hit, impactor, &mut state.rng);
            events.push(GameEvent::AsteroidDestroyed {
                size: hit.size,
                points: 0,
            });

            match state
                .ship
                .destroy(&mut state.particles, scheduler, &mut state.rng)
            {
                Destruction::LifeLost { lives_left } => {
                    events.push(GameEvent::ShipDestroyed { lives_left });
                }
                Destruction::GameOver => {
                    state.phase = GamePhase::GameOver;
                    events.push(GameEvent::GameOver);
                    log::info!("Game over, final score {}", state.score);
                }
            }
        }
    }

    for bullet in state.bullets.iter_mut() {
        if bullet.collided {
            continue;
        }
        let Some(index) = weak_test(bullet, state.asteroids.as_slice()) else {
            continue;
        };
        bullet.register_hit();
        let hit = state.asteroids.remove(index);
        let impactor = Impactor {
            pos: bullet.pos,
            vel: bullet.vel,
        };
        state.asteroids.break_apart(&hit, impactor, &mut state.rng);

        let points = hit.points();
        state.score += points;
        events.push(GameEvent::AsteroidDestroyed {
            size: hit.size,
            points,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{InputHandle, Key, TimerEvent, TimerQueue};
    use crate::render::DrawList;
    use crate::settings::Settings;
    use crate::sim::asteroid::Asteroid;
    use glam::Vec2;
    use std::time::Duration;

    fn empty_state() -> GameState {
        GameState::empty(Settings::default())
    }

    fn park_far_asteroid(state: &mut GameState) {
        // keeps the wave from restarting during a test
        let asteroid = Asteroid::new(Vec2::new(5.0, 95.0), Vec2::ZERO, 4.0, &mut state.rng);
        state.asteroids.insert(asteroid);
    }

    #[test]
    fn test_coincident_asteroid_destroys_ship() {
        let mut state = empty_state();
        let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 16.0, &mut state.rng);
        state.asteroids.insert(asteroid);
        let mut timers = TimerQueue::new();

        let mut events = Vec::new();
        collide(&mut state, &mut timers, &mut events);

        assert!(state.ship.pause_drawing);
        assert_eq!(state.ship.lives, STARTING_LIVES - 1);
        assert_eq!(state.particles.len(), 5);
        assert!(events.contains(&GameEvent::ShipDestroyed {
            lives_left: STARTING_LIVES - 1
        }));
        // the size-16 rock split on the hull
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_paused_ship_is_not_collision_checked() {
        let mut state = empty_state();
        state.ship.pause_drawing = true;
        let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 16.0, &mut state.rng);
        state.asteroids.insert(asteroid);

        let mut events = Vec::new();
        collide(&mut state, &mut TimerQueue::new(), &mut events);
        assert!(events.is_empty());
        assert_eq!(state.ship.lives, STARTING_LIVES);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut state = empty_state();
        let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 4.0, &mut state.rng);
        state.asteroids.insert(asteroid);
        park_far_asteroid(&mut state);
        let mut timers = TimerQueue::new();
        collide(&mut state, &mut timers, &mut Vec::new());
        assert!(state.ship.pause_drawing);

        for event in timers.advance(Duration::from_millis(SHIP_RESPAWN_DELAY_MS)) {
            state.handle_timer(event);
        }
        assert!(state.ship.is_active());
    }

    #[test]
    fn test_input_accepted_again_after_respawn() {
        let handle = InputHandle::new();
        let mut state = empty_state().with_controller(Box::new(handle.controller()));
        let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 16.0, &mut state.rng);
        state.asteroids.insert(asteroid);
        park_far_asteroid(&mut state);
        let mut timers = TimerQueue::new();
        collide(&mut state, &mut timers, &mut Vec::new());

        handle.press(Key::Thrust);
        assert!(handle.is_suspended());

        for event in timers.advance(Duration::from_millis(SHIP_RESPAWN_DELAY_MS)) {
            state.handle_timer(event);
        }
        assert!(state.ship.is_active());
        assert!(!handle.is_suspended());

        handle.press(Key::Thrust);
        sub_step(&mut state, &mut Vec::new());
        assert!(state.ship.is_accelerating);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = GameState::empty(Settings {
            starting_lives: 1,
            ..Default::default()
        });
        let asteroid = Asteroid::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 16.0, &mut state.rng);
        state.asteroids.insert(asteroid);
        let mut timers = TimerQueue::new();
        let mut events = Vec::new();
        collide(&mut state, &mut timers, &mut events);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(timers.pending(), 0);
        state.handle_timer(TimerEvent::ShipRespawn);
        assert!(state.ship.pause_drawing);
    }

    #[test]
    fn test_bullet_lands_one_unit_ahead() {
        let handle = InputHandle::new();
        let mut state = empty_state().with_controller(Box::new(handle.controller()));
        park_far_asteroid(&mut state);

        handle.press(Key::Fire);
        let mut events = Vec::new();
        sub_step(&mut state, &mut events);

        assert_eq!(state.bullets.len(), 1);
        let bullet = state.bullets.iter().next().unwrap();
        assert!((bullet.pos - Vec2::new(50.0, 49.0)).length() < 1e-5);
        assert!(events.is_empty());
    }

    #[test]
    fn test_bullet_splits_asteroid_and_scores() {
        let handle = InputHandle::new();
        let mut state = empty_state().with_controller(Box::new(handle.controller()));
        let target = Asteroid::new(Vec2::new(50.0, 35.0), Vec2::ZERO, 16.0, &mut state.rng);
        state.asteroids.insert(target);
        let mut timers = TimerQueue::new();
        let mut sink = DrawList::new();

        handle.press(Key::Fire);
        let mut destroyed = None;
        for _ in 0..120 {
            for event in frame(&mut state, &mut timers, &mut sink) {
                if let GameEvent::AsteroidDestroyed { size, points } = event {
                    destroyed = Some((size, points));
                }
            }
            if destroyed.is_some() {
                break;
            }
        }

        assert_eq!(destroyed, Some((16.0, 20)));
        assert_eq!(state.score, 20);
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.size == 8.0));
        let bullet = state.bullets.iter().next().unwrap();
        assert!(bullet.collided);
    }

    #[test]
    fn test_sixth_shot_is_dropped() {
        let mut state = empty_state();
        park_far_asteroid(&mut state);
        let mut events = Vec::new();
        for _ in 0..6 {
            fire(&mut state, &mut events);
        }
        assert_eq!(state.bullets.len(), 5);
        assert_eq!(events, vec![GameEvent::ShotDropped]);
    }

    #[test]
    fn test_cleared_field_starts_next_wave() {
        let mut state = empty_state();
        let mut timers = TimerQueue::new();
        let events = frame(&mut state, &mut timers, &mut DrawList::new());
        assert_eq!(state.wave, 1);
        assert!(events.contains(&GameEvent::WaveStarted {
            wave: 1,
            asteroids: state.settings.initial_asteroids + 1,
        }));
    }

    #[test]
    fn test_frames_are_deterministic() {
        let run = || {
            let mut state = GameState::new(Settings::default());
            let mut timers = TimerQueue::new();
            let mut sink = DrawList::new();
            for _ in 0..300 {
                frame(&mut state, &mut timers, &mut sink);
            }
            (
                state.asteroids.as_slice().to_vec(),
                state.ship.pos,
                state.ship.lives,
            )
        };
        assert_eq!(run(), run());
    }
}
