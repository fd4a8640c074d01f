use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{Mat4, Vec3};

/// Rotation quaternion `(x, y, z, w)`.
///
/// Multiplication does not renormalize; callers keep rotations unit-length
/// (see [`Quat::normalized`]).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// No rotation.
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis`. The axis is expected to be unit length.
    pub fn from_angle_axis(angle: f32, axis: Vec3) -> Self {
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Rotation from roll (x), pitch (y) and yaw (z) angles in radians.
    pub fn from_euler(euler: Vec3) -> Self {
        let (sin_roll, cos_roll) = (euler.x * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (euler.y * 0.5).sin_cos();
        let (sin_yaw, cos_yaw) = (euler.z * 0.5).sin_cos();

        Self::new(
            sin_roll * cos_pitch * cos_yaw - cos_roll * sin_pitch * sin_yaw,
            cos_roll * sin_pitch * cos_yaw + sin_roll * cos_pitch * sin_yaw,
            cos_roll * cos_pitch * sin_yaw - sin_roll * sin_pitch * cos_yaw,
            cos_roll * cos_pitch * cos_yaw + sin_roll * sin_pitch * sin_yaw,
        )
    }

    /// Hamilton product `self * rhs`. Not commutative.
    pub fn multiply(self, rhs: Quat) -> Self {
        let (q1, q2) = (self, rhs);
        Self::new(
            q1.w * q2.x + q1.x * q2.w + q1.y * q2.z - q1.z * q2.y,
            q1.w * q2.y - q1.x * q2.z + q1.y * q2.w + q1.z * q2.x,
            q1.w * q2.z + q1.x * q2.y - q1.y * q2.x + q1.z * q2.w,
            q1.w * q2.w - q1.x * q2.x - q1.y * q2.y - q1.z * q2.z,
        )
    }

    /// Negates the vector part. For a unit quaternion this is the inverse rotation.
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates `v` by computing `q * (v, 0) * conjugate(q)`.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let pure = Quat::new(v.x, v.y, v.z, 0.0);
        let r = self.multiply(pure).multiply(self.conjugate());
        Vec3::new(r.x, r.y, r.z)
    }

    /// Applies an additional euler rotation on top of this one.
    pub fn rotate_euler(self, euler: Vec3) -> Self {
        self.multiply(Self::from_euler(euler))
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit-length copy, or [`Quat::IDENTITY`] for a zero quaternion.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / m;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// 4x4 rotation matrix for row-vector points (see [`Mat4`]).
    pub fn to_mat4(self) -> Mat4 {
        let (xx, xy, xz, xw) = (self.x * self.x, self.x * self.y, self.x * self.z, self.x * self.w);
        let (yy, yz, yw) = (self.y * self.y, self.y * self.z, self.y * self.w);
        let (zz, zw) = (self.z * self.z, self.z * self.w);

        let mut m = [0.0; 16];
        m[0] = 1.0 - 2.0 * (yy + zz);
        m[4] = 2.0 * (xy - zw);
        m[8] = 2.0 * (xz + yw);

        m[1] = 2.0 * (xy + zw);
        m[5] = 1.0 - 2.0 * (xx + zz);
        m[9] = 2.0 * (yz - xw);

        m[2] = 2.0 * (xz - yw);
        m[6] = 2.0 * (yz + xw);
        m[10] = 1.0 - 2.0 * (xx + yy);

        m[15] = 1.0;
        Mat4::from_array(m)
    }
}

impl Mul for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate(rhs)
    }
}
