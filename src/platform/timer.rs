//! One-shot delayed events
//!
//! The ship asks a [`Scheduler`] to wake it up after its respawn delay. The
//! real scheduler belongs to the host (a browser timeout, an event-loop
//! timer); [`TimerQueue`] is a simulated-time stand-in driven by the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Events the core asks to be woken with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Destroyed-pause is over; the ship may fly again
    ShipRespawn,
}

/// Delayed-callback capability
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent);
}

/// Scheduler that fires when the caller advances simulated time
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    pending: Vec<(Duration, TimerEvent)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward; returns due events in firing order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        self.now += elapsed;
        let now = self.now;
        let mut due: Vec<(Duration, TimerEvent)> = Vec::new();
        self.pending.retain(|&(at, event)| {
            if at <= now {
                due.push((at, event));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, event)| event).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.pending.push((self.now + delay, event));
    }
}
