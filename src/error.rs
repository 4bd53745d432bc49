//! Simulation error types.
//!
//! Nothing in here is fatal to the frame loop: callers log and drop the
//! failed action, then carry on with the rest of the frame.

use thiserror::Error;

/// Top-level error enum for the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// Firing while every usable projectile slot is occupied.
    #[error("projectile pool full (capacity {capacity})")]
    PoolFull {
        /// Ring buffer capacity, including the sacrificed slot.
        capacity: usize,
    },

    /// A particle effect was requested by a name no variant answers to.
    #[error("unknown particle effect kind '{0}'")]
    UnknownEffect(String),

    /// Settings JSON failed to parse.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
