//! Fractal Brownian motion layered over the interpolated lattice noise.

use planetary_math::Vec3;

use crate::lattice::noise3_interpolated;

/// Number of layers summed by [`noise3_fbm`].
pub const OCTAVES: i32 = 16;

/// Amplitude falloff between consecutive octaves.
pub const PERSISTENCE: f32 = 0.5;

/// Exclusive upper bound of [`noise3_fbm`]: the geometric series `sum(0.5^i)`.
pub const FBM_MAX: f32 = 2.0;

/// Sums [`OCTAVES`] layers of interpolated noise, octave `i` at frequency
/// `2^i` and amplitude `0.5^i`. The result lies in `[0, FBM_MAX)`.
pub fn noise3_fbm(x: f32, y: f32, z: f32) -> f32 {
    let mut total = 0.0;
    for i in 0..OCTAVES {
        let freq = 2.0_f32.powi(i);
        let amplitude = PERSISTENCE.powi(i);
        total += noise3_interpolated(x * freq, y * freq, z * freq) * amplitude;
    }
    total
}

/// [`noise3_fbm`] evaluated at a point that is itself made of three fBm samples.
///
/// `warp` scales how far apart the y and z sample offsets drift; `0.0` still
/// warps along x.
pub fn noise3_fbm_warped(x: f32, y: f32, z: f32, warp: f32) -> f32 {
    let a = noise3_fbm(x, y, z);
    let b = noise3_fbm(x + 5.2, y + 1.3 * warp, z + 6.4 * warp);
    let c = noise3_fbm(x + 7.5, y + 0.3 * warp, z + 3.6 * warp);
    noise3_fbm(a, b, c)
}

/// [`noise3_fbm`] at a point given as a vector.
pub fn sample_fbm(p: Vec3) -> f32 {
    noise3_fbm(p.x, p.y, p.z)
}
