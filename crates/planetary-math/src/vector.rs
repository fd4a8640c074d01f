use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::scalar::{self, EPSILON};

/// Implements the componentwise operators shared by every vector type.
macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> Self::Output {
                $ty { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> Self::Output {
                $ty { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Neg for $ty {
            type Output = $ty;

            fn neg(self) -> Self::Output {
                $ty { $($field: -self.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = $ty;

            fn mul(self, rhs: f32) -> Self::Output {
                $ty { $($field: self.$field * rhs),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl MulAssign<f32> for $ty {
            fn mul_assign(&mut self, rhs: f32) {
                $(self.$field *= rhs;)+
            }
        }
    };
}

/// 2D vector of `f32` components.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl_vector_ops!(Vec2 { x, y });

impl Vec2 {
    /// (0, 0).
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);
    /// (1, 1).
    pub const ONE: Vec2 = Vec2::new(1.0, 1.0);
    /// (0, 1).
    pub const UP: Vec2 = Vec2::new(0.0, 1.0);
    /// (0, -1).
    pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
    /// (-1, 0).
    pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
    /// (1, 0).
    pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this vector multiplied by `s`.
    pub fn scaled(self, s: f32) -> Self {
        self * s
    }

    /// Multiplies this vector by `s` in place.
    pub fn scale(&mut self, s: f32) {
        *self *= s;
    }

    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn square_magnitude(self) -> f32 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f32 {
        self.square_magnitude().sqrt()
    }

    pub fn square_distance(self, other: Vec2) -> f32 {
        (other - self).square_magnitude()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).magnitude()
    }

    /// Linear interpolation towards `other`. `t` is not clamped.
    pub fn lerp(self, other: Vec2, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Componentwise minimum.
    pub fn min(self, other: Vec2) -> Self {
        Self::new(
            if self.x <= other.x { self.x } else { other.x },
            if self.y <= other.y { self.y } else { other.y },
        )
    }

    /// Componentwise maximum.
    pub fn max(self, other: Vec2) -> Self {
        Self::new(
            if self.x >= other.x { self.x } else { other.x },
            if self.y >= other.y { self.y } else { other.y },
        )
    }

    /// Every component within [`EPSILON`] of the other's.
    pub fn approx_eq(self, other: Vec2) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }

    /// Unit-length copy of this vector, or [`Vec2::ZERO`] for the zero vector.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            return Self::ZERO;
        }
        self * (1.0 / m)
    }

    /// Normalizes in place; the zero vector stays zero.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Unsigned angle to `other` in radians, `0.0` if either is zero-length.
    pub fn angle(self, other: Vec2) -> f32 {
        let mag1 = self.magnitude();
        let mag2 = other.magnitude();
        if mag1 == 0.0 || mag2 == 0.0 {
            return 0.0;
        }
        scalar::clamp(self.dot(other) / (mag1 * mag2), -1.0, 1.0).acos()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:.6} {:.6}}}", self.x, self.y)
    }
}

/// 3D vector of `f32` components.
///
/// Also used as a position and as a pure-imaginary quaternion when rotating.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl_vector_ops!(Vec3 { x, y, z });

impl Vec3 {
    /// (0, 0, 0).
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// (1, 1, 1).
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `magnitude`.
    pub const fn one(magnitude: f32) -> Self {
        Self::new(magnitude, magnitude, magnitude)
    }

    /// +Y scaled by `magnitude`.
    pub const fn up(magnitude: f32) -> Self {
        Self::new(0.0, magnitude, 0.0)
    }

    /// -Y scaled by `magnitude`.
    pub const fn down(magnitude: f32) -> Self {
        Self::new(0.0, -magnitude, 0.0)
    }

    /// -X scaled by `magnitude`.
    pub const fn left(magnitude: f32) -> Self {
        Self::new(-magnitude, 0.0, 0.0)
    }

    /// +X scaled by `magnitude`.
    pub const fn right(magnitude: f32) -> Self {
        Self::new(magnitude, 0.0, 0.0)
    }

    /// +Z scaled by `magnitude`.
    pub const fn forward(magnitude: f32) -> Self {
        Self::new(0.0, 0.0, magnitude)
    }

    /// -Z scaled by `magnitude`.
    pub const fn back(magnitude: f32) -> Self {
        Self::new(0.0, 0.0, -magnitude)
    }

    /// Returns this vector multiplied by `s`.
    pub fn scaled(self, s: f32) -> Self {
        self * s
    }

    /// Multiplies this vector by `s` in place.
    pub fn scale(&mut self, s: f32) {
        *self *= s;
    }

    /// Componentwise product.
    pub fn mul_elements(self, rhs: Vec3) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product `self × rhs`.
    pub fn cross(self, rhs: Vec3) -> Self {
        Self::new(
            (self.y * rhs.z) - (self.z * rhs.y),
            -((self.x * rhs.z) - (self.z * rhs.x)),
            (self.x * rhs.y) - (self.y * rhs.x),
        )
    }

    pub fn square_magnitude(self) -> f32 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f32 {
        self.square_magnitude().sqrt()
    }

    pub fn square_distance(self, other: Vec3) -> f32 {
        (other - self).square_magnitude()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).magnitude()
    }

    /// Linear interpolation towards `other`. `t` is not clamped.
    pub fn lerp(self, other: Vec3, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Componentwise minimum.
    pub fn min(self, other: Vec3) -> Self {
        Self::new(
            if self.x <= other.x { self.x } else { other.x },
            if self.y <= other.y { self.y } else { other.y },
            if self.z <= other.z { self.z } else { other.z },
        )
    }

    /// Componentwise maximum.
    pub fn max(self, other: Vec3) -> Self {
        Self::new(
            if self.x >= other.x { self.x } else { other.x },
            if self.y >= other.y { self.y } else { other.y },
            if self.z >= other.z { self.z } else { other.z },
        )
    }

    /// Every component within [`EPSILON`] of the other's.
    pub fn approx_eq(self, other: Vec3) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
    }

    /// Unit-length copy of this vector, or [`Vec3::ZERO`] for the zero vector.
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 {
            return Self::ZERO;
        }
        self * (1.0 / m)
    }

    /// Normalizes in place; the zero vector stays zero.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Unsigned angle to `other` in radians, `0.0` if either is zero-length.
    pub fn angle(self, other: Vec3) -> f32 {
        let mag1 = self.magnitude();
        let mag2 = other.magnitude();
        if mag1 == 0.0 || mag2 == 0.0 {
            return 0.0;
        }
        scalar::clamp(self.dot(other) / (mag1 * mag2), -1.0, 1.0).acos()
    }

    /// Appends `w`.
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:.6} {:.6} {:.6}}}", self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// 4D vector of `f32` components.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl_vector_ops!(Vec4 { x, y, z, w });

impl Vec4 {
    /// (0, 0, 0, 0).
    pub const ZERO: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn dot(self, rhs: Vec4) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Linear interpolation towards `other`. `t` is not clamped.
    pub fn lerp(self, other: Vec4, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Drops `w`.
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}
