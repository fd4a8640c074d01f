//! Camera transform and projection, combined into one view-projection matrix.

use planetary_math::scalar::deg_to_rad;
use planetary_math::{Mat4, Vec3};

use crate::transform::Transform;

/// Projection used by a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// `fov_y` is the vertical field of view in radians.
    Perspective { fov_y: f32, near: f32, far: f32 },
    Orthographic {
        bottom: f32,
        top: f32,
        left: f32,
        right: f32,
        near: f32,
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective {
            fov_y: deg_to_rad(70.0),
            near: 0.0001,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// A 32 x 18 unit box between depths 0.1 and 75.
    pub fn default_orthographic() -> Self {
        Projection::Orthographic {
            bottom: -9.0,
            top: 9.0,
            left: -16.0,
            right: 16.0,
            near: 0.1,
            far: 75.0,
        }
    }

    /// `aspect` (width / height) only affects perspective projections.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match *self {
            Projection::Perspective { fov_y, near, far } => {
                Mat4::perspective(fov_y, aspect, near, far)
            }
            Projection::Orthographic {
                bottom,
                top,
                left,
                right,
                near,
                far,
            } => Mat4::orthographic(bottom, top, left, right, near, far),
        }
    }
}

/// A viewpoint in the scene.
///
/// [`Camera::update`] must run once per frame, after the transform moves and
/// before anything is drawn, to refresh [`Camera::view_projection`].
#[derive(Clone, Debug)]
pub struct Camera {
    pub transform: Transform,
    pub projection: Projection,
    view_projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl Camera {
    /// Position the camera starts at, three units behind the origin.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);

    pub fn new(projection: Projection) -> Self {
        Self {
            transform: Transform::from_position(Self::DEFAULT_POSITION),
            projection,
            view_projection: Mat4::IDENTITY,
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection.matrix(aspect)
    }

    /// World-to-camera matrix.
    ///
    /// The eye is offset one unit from [`Transform::position`] along the
    /// camera's forward (+Z) axis.
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = self.transform.rotation;
        let offset = rotation.rotate(Vec3::back(1.0));
        let translation = Mat4::from_translation(-self.transform.position + offset);
        translation * rotation.conjugate().to_mat4()
    }

    /// Recomputes the view-projection matrix for a viewport of the given
    /// aspect ratio. A zero aspect produces non-finite entries.
    ///
    /// The perspective term is built from zero, not from identity, so its
    /// element 15 is 0 and clip w equals view-space z. Seeding it with the
    /// identity would leave a stray 1 there and skew w by one unit.
    pub fn update(&mut self, aspect: f32) {
        self.view_projection = self.view_matrix() * self.projection_matrix(aspect);
    }

    /// The matrix computed by the last [`Camera::update`].
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }
}
