//! Mouse motion accumulated between polls.

use planetary_math::Vec2;

/// Sums cursor movement until the consumer takes it.
///
/// While captured, only raw device motion counts; otherwise the difference
/// between successive cursor positions does.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    captured: bool,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `CursorMoved` in window pixels. The first position only seeds the tracker.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let next = Vec2::new(x as f32, y as f32);
        if let Some(prev) = self.position {
            if !self.captured {
                self.delta += next - prev;
            }
        }
        self.position = Some(next);
    }

    /// `DeviceEvent::MouseMotion`.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Motion accumulated so far, without consuming it.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Motion since the previous call; resets the accumulator.
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }
}
