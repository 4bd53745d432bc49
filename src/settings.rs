//! Simulation settings
//!
//! Loaded from JSON; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;
use crate::error::SimError;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hitbox/axis overlays and debug-level logging of dropped actions.
    /// Never changes simulation outcomes.
    pub debug: bool,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Asteroids spawned for the first wave
    pub initial_asteroids: usize,
    /// Initial asteroid drift speed (units/sec)
    pub asteroid_speed: f32,
    /// Lives at the start of a run
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            seed: 0x5EED,
            initial_asteroids: 4,
            asteroid_speed: 6.0,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
