//! Vectors, quaternions, 4x4 matrices and scalar helpers for Planetary.
//!
//! Everything here is a pure function over `f32` values. The only guarded
//! edge cases are zero-magnitude normalization and zero-magnitude angle
//! computation, which return the zero vector and `0.0` respectively instead
//! of propagating `NaN`.

mod interop;
mod matrix;
mod quat;
pub mod scalar;
mod vector;

pub use matrix::Mat4;
pub use quat::Quat;
pub use scalar::EPSILON;
pub use vector::{Vec2, Vec3, Vec4};
