//! Decoded player input
//!
//! The event layer turns key presses and releases into an [`ActiveInput`]
//! vector (rotate left, rotate right, thrust) and an edge-triggered fire
//! latch. The ship reads that state once per sub-step through its
//! [`Controller`]; nothing is queued, the latest state wins. A suspended
//! controller drops every event until the ship's respawn resumes it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Held-key state read by the ship each sub-step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

impl ActiveInput {
    /// `[left, right, thrust]`
    pub fn as_array(&self) -> [bool; 3] {
        [self.left, self.right, self.thrust]
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

/// What the ship needs from whoever is steering it
pub trait Controller {
    /// Current held-key state
    fn active_input(&self) -> ActiveInput;

    /// True once per fire press; clears the latch
    fn take_fire(&mut self) -> bool;

    /// Stop delivering input and drop held keys until [`Controller::resume`]
    fn suspend(&mut self);

    /// Deliver input again
    fn resume(&mut self);
}

#[derive(Debug, Default)]
struct SharedState {
    active: ActiveInput,
    fire: bool,
    suspended: bool,
}

/// Event-layer side of the shared input state
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    state: Rc<RefCell<SharedState>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller reading the same state, for handing to the ship
    pub fn controller(&self) -> KeyboardController {
        KeyboardController {
            state: Rc::clone(&self.state),
        }
    }

    /// Key went down. Ignored while input is suspended.
    pub fn press(&self, key: Key) {
        let mut state = self.state.borrow_mut();
        if state.suspended {
            log::trace!("dropped {:?} press while suspended", key);
            return;
        }
        match key {
            Key::RotateLeft => state.active.left = true,
            Key::RotateRight => state.active.right = true,
            Key::Thrust => state.active.thrust = true,
            Key::Fire => state.fire = true,
        }
    }

    /// Key came up. Ignored while input is suspended.
    pub fn release(&self, key: Key) {
        let mut state = self.state.borrow_mut();
        if state.suspended {
            return;
        }
        match key {
            Key::RotateLeft => state.active.left = false,
            Key::RotateRight => state.active.right = false,
            Key::Thrust => state.active.thrust = false,
            Key::Fire => {}
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.state.borrow().suspended
    }
}

/// Ship-side view of an [`InputHandle`]
#[derive(Debug)]
pub struct KeyboardController {
    state: Rc<RefCell<SharedState>>,
}

impl Controller for KeyboardController {
    fn active_input(&self) -> ActiveInput {
        self.state.borrow().active
    }

    fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().fire)
    }

    fn suspend(&mut self) {
        let mut state = self.state.borrow_mut();
        state.active = ActiveInput::default();
        state.fire = false;
        state.suspended = true;
        log::debug!("input suspended");
    }

    fn resume(&mut self) {
        self.state.borrow_mut().suspended = false;
        log::debug!("input resumed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_decodes_vector() {
        let handle = InputHandle::new();
        let controller = handle.controller();

        handle.press(Key::RotateLeft);
        handle.press(Key::Thrust);
        assert_eq!(controller.active_input().as_array(), [true, false, true]);

        handle.release(Key::RotateLeft);
        handle.press(Key::RotateRight);
        assert_eq!(controller.active_input().as_array(), [false, true, true]);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let handle = InputHandle::new();
        let mut controller = handle.controller();

        assert!(!controller.take_fire());
        handle.press(Key::Fire);
        assert!(controller.take_fire());
        assert!(!controller.take_fire());
    }

    #[test]
    fn test_suspend_clears_and_drops_events() {
        let handle = InputHandle::new();
        let mut controller = handle.controller();
        handle.press(Key::Thrust);

        controller.suspend();
        assert!(handle.is_suspended());
        assert_eq!(controller.active_input(), ActiveInput::default());

        handle.press(Key::Fire);
        handle.press(Key::RotateLeft);
        assert!(!controller.take_fire());
        assert!(!controller.active_input().left);
    }

    #[test]
    fn test_resume_accepts_keys_again() {
        let handle = InputHandle::new();
        let mut controller = handle.controller();
        controller.suspend();
        handle.press(Key::RotateRight);
        assert!(!controller.active_input().right);

        controller.resume();
        assert!(!handle.is_suspended());
        handle.press(Key::RotateRight);
        assert!(controller.active_input().right);
    }
}
