//! Held-key tracking by physical key code.
//!
//! Physical codes keep WASD on the same keys for every layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// A key transition with the winit event stripped away, so tests and
/// headless platforms can feed input without constructing a `KeyEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn press(key: PhysicalKey) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn release(key: PhysicalKey) -> Self {
        Self {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Which keys are down, plus the edges seen since the last [`KeyboardState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    pressed: HashSet<PhysicalKey>,
    released: HashSet<PhysicalKey>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Auto-repeat events are dropped; they carry no new state.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.key) {
                    self.released.insert(event.key);
                }
            }
        }
    }

    pub fn is_held(&self, key: PhysicalKey) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    pub fn was_released(&self, key: PhysicalKey) -> bool {
        self.released.contains(&key)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Forgets the press/release edges. Held keys stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    /// Releases everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.released.extend(self.held.drain());
        self.pressed.clear();
    }
}
