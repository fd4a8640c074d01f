//! Lattice hash and its cosine-smoothed 3D interpolation.

use planetary_math::Vec3;
use planetary_math::scalar::{cerp, fraction};

/// Output of `sin` is spread across this many periods before taking the fraction.
const SPREAD: f32 = 6151.0;

const X_WEIGHT: f32 = 53.0;
const Y_WEIGHT: f32 = 97.0;
const Z_WEIGHT: f32 = 193.0;

/// Pseudo-random value in `[0, 1)` for a 1D coordinate.
pub fn noise1(x: f32) -> f32 {
    fraction((x * X_WEIGHT).sin() * SPREAD)
}

/// Pseudo-random value in `[0, 1)` for a 2D coordinate.
pub fn noise2(x: f32, y: f32) -> f32 {
    fraction((x * X_WEIGHT + y * Y_WEIGHT).sin() * SPREAD)
}

/// Pseudo-random value in `[0, 1)` for a 3D coordinate.
pub fn noise3(x: f32, y: f32, z: f32) -> f32 {
    fraction((x * X_WEIGHT + y * Y_WEIGHT + z * Z_WEIGHT).sin() * SPREAD)
}

/// Smooth 3D noise: cosine-interpolates [`noise3`] at the 8 surrounding lattice corners.
///
/// Corners pair up into four edges along x, the edges into two faces along
/// y, and the faces into the final value along z.
pub fn noise3_interpolated(x: f32, y: f32, z: f32) -> f32 {
    let (fx, fy, fz) = (fraction(x), fraction(y), fraction(z));
    let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
    let (x1, y1, z1) = (x0 + 1.0, y0 + 1.0, z0 + 1.0);

    let rear_bottom = cerp(noise3(x0, y0, z0), noise3(x1, y0, z0), fx);
    let rear_top = cerp(noise3(x0, y1, z0), noise3(x1, y1, z0), fx);
    let front_bottom = cerp(noise3(x0, y0, z1), noise3(x1, y0, z1), fx);
    let front_top = cerp(noise3(x0, y1, z1), noise3(x1, y1, z1), fx);

    let rear = cerp(rear_bottom, rear_top, fy);
    let front = cerp(front_bottom, front_top, fy);

    cerp(rear, front, fz)
}

/// A point inside the ball of radius `range`, picked deterministically from `seed`.
///
/// Candidates are drawn from [`noise3`] on the cube `[-1, 1]^3` until one
/// lands inside the unit ball, then scaled.
pub fn random_in_unit_ball(seed: u32, range: f32) -> Vec3 {
    let base = seed as f32;
    let mut i = 0.0_f32;
    loop {
        let s = base + i;
        let candidate = Vec3::new(
            noise3(s + 1.0, s, s) * 2.0 - 1.0,
            noise3(s, s + 1.0, s) * 2.0 - 1.0,
            noise3(s, s, s + 1.0) * 2.0 - 1.0,
        );
        if candidate.square_magnitude() <= 1.0 {
            return candidate * range;
        }
        i += 1.0;
    }
}
