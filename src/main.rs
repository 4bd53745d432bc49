//! Roid Field headless driver
//!
//! Runs the simulation for a fixed number of frames with a scripted pilot and
//! logs what happened. Rendering goes into a recorded draw list.
//!
//! Usage: `roid-field [settings.json] [frames]`

use std::time::Duration;

use serde::Serialize;

use roid_field::Settings;
use roid_field::consts::*;
use roid_field::platform::{ActiveInput, Controller, TimerQueue};
use roid_field::render::DrawList;
use roid_field::sim::{GameEvent, GamePhase, GameState, frame};

const DEFAULT_FRAMES: u32 = 60 * FRAME_RATE;

/// Sub-steps between autopilot shots
const FIRE_INTERVAL: u32 = 45;

/// Keeps turning, fires on a fixed cadence, thrusts in bursts
#[derive(Debug, Default)]
struct Autopilot {
    sub_steps: u32,
}

impl Controller for Autopilot {
    fn active_input(&self) -> ActiveInput {
        let phase = self.sub_steps / (FRAME_RATE * NUM_SUB_FRAMES);
        ActiveInput {
            left: false,
            right: true,
            thrust: phase % 3 == 0,
        }
    }

    fn take_fire(&mut self) -> bool {
        self.sub_steps += 1;
        self.sub_steps % FIRE_INTERVAL == 0
    }

    fn suspend(&mut self) {
        log::debug!("autopilot suspended");
    }

    fn resume(&mut self) {
        log::debug!("autopilot resumed");
    }
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    frames: u32,
    phase: Option<GamePhase>,
    score: u64,
    wave: u32,
    lives: u8,
    asteroids: usize,
    asteroids_destroyed: u32,
    ships_lost: u32,
    shots_dropped: u32,
    draw_calls: usize,
}

fn load_settings(path: Option<&String>) -> Settings {
    match path {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load settings from {}: {}; using defaults", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    }
}

fn main() {
    env_logger::init();
    log::info!("Roid Field (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = load_settings(args.first());
    let frames = args
        .get(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    log::info!("Game initialized with seed: {}", settings.seed);
    let mut state = GameState::new(settings).with_controller(Box::new(Autopilot::default()));
    let mut timers = TimerQueue::new();
    let mut sink = DrawList::new();
    let mut summary = Summary::default();
    let frame_time = Duration::from_secs_f32(FRAME_DT);

    for _ in 0..frames {
        for event in frame(&mut state, &mut timers, &mut sink) {
            match event {
                GameEvent::AsteroidDestroyed { .. } => summary.asteroids_destroyed += 1,
                GameEvent::ShipDestroyed { .. } | GameEvent::GameOver => summary.ships_lost += 1,
                GameEvent::ShotDropped => summary.shots_dropped += 1,
                GameEvent::WaveStarted { .. } => {}
            }
        }
        for event in timers.advance(frame_time) {
            state.handle_timer(event);
        }
        summary.frames += 1;
        summary.draw_calls += sink.len();
    }

    summary.phase = Some(state.phase);
    summary.score = state.score;
    summary.wave = state.wave;
    summary.lives = state.ship.lives;
    summary.asteroids = state.asteroids.len();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
    log::info!(
        "Finished {} frames: score {}, wave {}",
        summary.frames,
        summary.score,
        summary.wave
    );
}
