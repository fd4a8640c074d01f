//! Scalar helpers shared by the vector types, the noise field and the camera.

use std::f32::consts::PI;

/// Tolerance used by the `approx_eq` family of comparisons.
pub const EPSILON: f32 = 1e-4;

/// Converts radians to degrees.
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

/// Converts degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Clamps `n` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when `min > max`; `max` wins.
pub fn clamp(n: f32, min: f32, max: f32) -> f32 {
    let n = if n < min { min } else { n };
    if n > max { max } else { n }
}

/// Clamps `n` into `[0, 1]`.
pub fn clamp01(n: f32) -> f32 {
    clamp(n, 0.0, 1.0)
}

/// Linear interpolation with an unclamped `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation with `t` clamped into `[0, 1]`.
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Cosine interpolation: eases in and out of both endpoints.
pub fn cerp(a: f32, b: f32, t: f32) -> f32 {
    let f = (1.0 - (t * PI).cos()) * 0.5;
    a * (1.0 - f) + b * f
}

/// Where `n` sits between `min` and `max`, as a fraction.
pub fn inverse_lerp(n: f32, min: f32, max: f32) -> f32 {
    (n - min) / (max - min)
}

/// Maps `n` from the range `[from_min, from_max]` onto `[to_min, to_max]`.
pub fn remap(n: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    (n - from_min) * (to_max - to_min) / (from_max - from_min) + to_min
}

/// Wraps `n` into `[0, max)`.
pub fn wrap_max(n: f32, max: f32) -> f32 {
    (max + n % max) % max
}

/// Wraps `n` into `[min, max)`.
pub fn wrap(n: f32, min: f32, max: f32) -> f32 {
    min + wrap_max(n - min, max - min)
}

/// Loops `n` so that it never exceeds `length` and never drops below zero.
pub fn repeat(n: f32, length: f32) -> f32 {
    clamp(n - (n / length).floor() * length, 0.0, length)
}

/// Bounces `n` back and forth between `0` and `length`.
pub fn ping_pong(n: f32, length: f32) -> f32 {
    let n = repeat(n, length * 2.0);
    (n - length).abs()
}

/// Shortest signed difference between two angles in degrees.
pub fn angle_delta(a: f32, b: f32) -> f32 {
    let delta = repeat(b - a, 360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Fractional part of `x`, always in `[0, 1)` for finite input.
pub fn fraction(x: f32) -> f32 {
    x - x.floor()
}

/// `true` when `a` and `b` differ by strictly less than `tolerance`.
pub fn approx_eq(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_radian_roundtrip() {
        assert!(approx_eq(deg_to_rad(180.0), PI, 1e-6));
        assert!(approx_eq(rad_to_deg(deg_to_rad(70.0)), 70.0, 1e-4));
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn test_lerp_is_unclamped() {
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp_clamped(0.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn test_cerp_hits_endpoints_and_midpoint() {
        assert!(approx_eq(cerp(2.0, 4.0, 0.0), 2.0, 1e-6));
        assert!(approx_eq(cerp(2.0, 4.0, 1.0), 4.0, 1e-6));
        assert!(approx_eq(cerp(2.0, 4.0, 0.5), 3.0, 1e-6));
    }

    #[test]
    fn test_cerp_eases_near_endpoints() {
        // Cosine interpolation moves slower than linear close to t = 0.
        assert!(cerp(0.0, 1.0, 0.1) < lerp(0.0, 1.0, 0.1));
    }

    #[test]
    fn test_remap_and_inverse_lerp() {
        assert_eq!(inverse_lerp(5.0, 0.0, 10.0), 0.5);
        assert_eq!(remap(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    }

    #[test]
    fn test_wrap_negative_values() {
        assert!(approx_eq(wrap_max(-1.0, 360.0), 359.0, 1e-4));
        assert!(approx_eq(wrap(370.0, 0.0, 360.0), 10.0, 1e-4));
    }

    #[test]
    fn test_ping_pong_bounces() {
        assert!(approx_eq(ping_pong(1.5, 1.0), 0.5, 1e-6));
        assert!(approx_eq(ping_pong(0.25, 1.0), 0.75, 1e-6));
    }

    #[test]
    fn test_angle_delta_takes_short_way_round() {
        assert!(approx_eq(angle_delta(350.0, 10.0), 20.0, 1e-3));
        assert!(approx_eq(angle_delta(10.0, 350.0), -20.0, 1e-3));
    }

    #[test]
    fn test_fraction_of_negative() {
        assert!(approx_eq(fraction(-0.25), 0.75, 1e-6));
        assert_eq!(fraction(3.0), 0.0);
    }

    #[test]
    fn test_approx_eq_is_strict() {
        assert!(!approx_eq(1.0, 1.5, 0.5));
        assert!(approx_eq(1.0, 1.4, 0.5));
    }
}
