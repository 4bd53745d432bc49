//! Platform abstraction layer
//!
//! The simulation core does not own an event loop. This module holds the
//! seams it talks through:
//! - Input: decoded key state shared with the event layer
//! - Time: one-shot delayed events (respawn after destruction)

pub mod input;
pub mod timer;

pub use input::{ActiveInput, Controller, InputHandle, Key, KeyboardController};
pub use timer::{Scheduler, TimerEvent, TimerQueue};
