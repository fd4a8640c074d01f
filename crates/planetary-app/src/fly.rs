//! Free-fly camera control: no collision, no gravity.

use planetary_config::CameraConfig;
use planetary_input::{InputSource, Key};
use planetary_math::{Quat, Vec3};
use planetary_render::Transform;

/// Turns held keys and mouse motion into camera movement.
///
/// W/S move along the camera's forward axis, A/D strafe, Space and left
/// shift rise and sink, comma and period roll. Mouse motion yaws about the
/// camera's up axis and pitches about its right axis. Holding left control
/// multiplies the movement speed.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeFlyController {
    pub move_speed: f32,
    pub boost_multiplier: f32,
    pub roll_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for FreeFlyController {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

fn axis(input: &impl InputSource, positive: Key, negative: Key) -> f32 {
    match (input.key_held(positive), input.key_held(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

impl FreeFlyController {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            boost_multiplier: config.boost_multiplier,
            roll_speed: config.roll_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    /// Turns `transform` by the mouse motion of the current frame.
    ///
    /// The delta is a per-frame quantity, so call this once per frame rather
    /// than once per simulation step.
    pub fn look(&self, input: &impl InputSource, transform: &mut Transform) -> bool {
        let delta = input.mouse_delta();
        let yaw = delta.x * self.mouse_sensitivity;
        let pitch = delta.y * self.mouse_sensitivity;
        if yaw == 0.0 && pitch == 0.0 {
            return false;
        }

        let local = Quat::from_angle_axis(yaw, Vec3::up(1.0))
            * Quat::from_angle_axis(pitch, Vec3::right(1.0));
        transform.rotation = (transform.rotation * local).normalized();
        true
    }

    /// Applies one simulation step of held keys to `transform`. Returns
    /// whether it moved or rolled.
    pub fn apply(&self, input: &impl InputSource, dt: f32, transform: &mut Transform) -> bool {
        let rolled = self.roll(input, dt, transform);
        let moved = self.fly(input, dt, transform);
        rolled || moved
    }

    fn roll(&self, input: &impl InputSource, dt: f32, transform: &mut Transform) -> bool {
        let roll = axis(input, Key::Comma, Key::Period) * self.roll_speed * dt;
        if roll == 0.0 {
            return false;
        }
        let local = Quat::from_angle_axis(roll, Vec3::forward(1.0));
        transform.rotation = (transform.rotation * local).normalized();
        true
    }

    fn fly(&self, input: &impl InputSource, dt: f32, transform: &mut Transform) -> bool {
        let direction = transform.forward() * axis(input, Key::W, Key::S)
            + transform.right() * axis(input, Key::D, Key::A)
            + transform.up() * axis(input, Key::Space, Key::LeftShift);
        if direction.square_magnitude() < 1e-6 {
            return false;
        }

        let mut speed = self.move_speed;
        if input.key_held(Key::LeftControl) {
            speed *= self.boost_multiplier;
        }
        transform.translate(direction.normalized() * (speed * dt));
        true
    }
}
