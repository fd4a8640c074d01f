//! Position, rotation and scale of a scene object.

use planetary_math::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Object-to-world matrix: scale, then rotate, then translate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
            * self.rotation.to_mat4()
            * Mat4::from_translation(self.position)
    }

    /// World-to-object matrix for an unscaled transform: undo the
    /// translation, then the rotation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position) * self.rotation.conjugate().to_mat4()
    }

    /// Local +Z in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::forward(1.0))
    }

    /// Local +X in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::right(1.0))
    }

    /// Local +Y in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::up(1.0))
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Applies a local euler rotation (roll, pitch, yaw in radians) and
    /// renormalizes.
    pub fn rotate_euler(&mut self, euler: Vec3) {
        self.rotation = self.rotation.rotate_euler(euler).normalized();
    }
}
