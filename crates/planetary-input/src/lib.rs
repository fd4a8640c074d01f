//! Keyboard and mouse state, and the small query surface the scene reads.

pub mod keyboard;
pub mod mouse;

use planetary_math::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;
use winit::keyboard::{KeyCode, PhysicalKey};

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;

/// Keys the free-fly camera listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    A,
    D,
    Space,
    LeftShift,
    LeftControl,
    Comma,
    Period,
}

impl Key {
    pub const ALL: [Key; 9] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::Space,
        Key::LeftShift,
        Key::LeftControl,
        Key::Comma,
        Key::Period,
    ];

    pub fn code(self) -> KeyCode {
        match self {
            Key::W => KeyCode::KeyW,
            Key::S => KeyCode::KeyS,
            Key::A => KeyCode::KeyA,
            Key::D => KeyCode::KeyD,
            Key::Space => KeyCode::Space,
            Key::LeftShift => KeyCode::ShiftLeft,
            Key::LeftControl => KeyCode::ControlLeft,
            Key::Comma => KeyCode::Comma,
            Key::Period => KeyCode::Period,
        }
    }

    pub fn physical(self) -> PhysicalKey {
        PhysicalKey::Code(self.code())
    }
}

/// What per-frame update code is allowed to ask about input.
pub trait InputSource {
    fn key_held(&self, key: Key) -> bool;

    /// Pointer motion since the previous frame, in pixels.
    fn mouse_delta(&self) -> Vec2;
}

/// Keyboard and mouse together, plus the mouse delta latched for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    frame_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches the accumulated mouse motion for this frame. Call after
    /// events are polled and before the scene updates.
    pub fn begin_frame(&mut self) {
        self.frame_delta = self.mouse.take_delta();
        if self.frame_delta != Vec2::ZERO {
            trace!("mouse delta {:?}", self.frame_delta);
        }
    }

    /// Clears per-frame key edges.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
    }
}

impl InputSource for InputState {
    fn key_held(&self, key: Key) -> bool {
        self.keyboard.is_held(key.physical())
    }

    fn mouse_delta(&self) -> Vec2 {
        self.frame_delta
    }
}
