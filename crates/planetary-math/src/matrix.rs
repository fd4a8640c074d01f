use std::fmt;
use std::ops::{Index, Mul};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// 4x4 matrix stored as 16 contiguous floats.
///
/// Element `i * 4 + j` sits in row `i`, column `j` for row-vector points
/// (`p' = p * M`), so the translation lives in elements 12, 13 and 14 and
/// `a * b` applies `a` first. A column-major shader reads the same 16 floats
/// as the conventional column-vector matrix, so the array is uploaded as is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    #[rustfmt::skip]
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn to_array(&self) -> [f32; 16] {
        self.m
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.m
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    /// Scale along each axis.
    pub fn from_scale(scale: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0] = scale.x;
        m[5] = scale.y;
        m[10] = scale.z;
        Self { m }
    }

    /// Translation by `offset`.
    pub fn from_translation(offset: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[12] = offset.x;
        m[13] = offset.y;
        m[14] = offset.z;
        Self { m }
    }

    /// Standard 4x4 product. `a.multiply(b)` transforms by `a` and then `b`.
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let (a, b) = (&self.m, &rhs.m);
        let mut r = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                r[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        Mat4 { m: r }
    }

    pub fn transpose(&self) -> Mat4 {
        let mut r = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                r[col * 4 + row] = self.m[row * 4 + col];
            }
        }
        Mat4 { m: r }
    }

    /// Orthographic projection of the box bounded by the given planes.
    pub fn orthographic(bottom: f32, top: f32, left: f32, right: f32, near: f32, far: f32) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0] = 2.0 / (right - left);
        m[5] = 2.0 / (top - bottom);
        m[10] = -2.0 / (far - near);
        m[12] = -(right + left) / (right - left);
        m[13] = -(top + bottom) / (top - bottom);
        m[14] = (far + near) / (far - near);
        m[15] = 1.0;
        Self { m }
    }

    /// Perspective projection looking down +Z.
    ///
    /// `fov_y` is the vertical field of view in radians and `aspect` is
    /// width / height. An aspect of zero yields infinities; callers must
    /// reject degenerate viewports first.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let cotan = 1.0 / (fov_y * 0.5).tan();
        let mut m = [0.0; 16];
        m[0] = cotan / aspect;
        m[5] = cotan;
        m[10] = -((near + far) / (near - far));
        m[11] = 1.0;
        m[14] = (2.0 * near * far) / (near - far);
        Self { m }
    }

    /// Transforms a point (w = 1) and drops the resulting w.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            p.x * m[0] + p.y * m[4] + p.z * m[8] + m[12],
            p.x * m[1] + p.y * m[5] + p.z * m[9] + m[13],
            p.x * m[2] + p.y * m[6] + p.z * m[10] + m[14],
        )
    }

    /// Transforms a point (w = 1) and divides by the resulting w.
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        let w = p.x * m[3] + p.y * m[7] + p.z * m[11] + m[15];
        self.transform_point(p) * (1.0 / w)
    }

    /// Transforms a direction (w = 0); translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0] + v.y * m[4] + v.z * m[8],
            v.x * m[1] + v.y * m[5] + v.z * m[9],
            v.x * m[2] + v.y * m[6] + v.z * m[10],
        )
    }

    /// Every element within `tolerance` of the other's.
    pub fn approx_eq(&self, other: &Mat4, tolerance: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.m[index]
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.m.chunks(4) {
            writeln!(f, "{:.2}, {:.2}, {:.2}, {:.2}", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
