//! Deterministic pseudo-random scalar noise over 1D, 2D and 3D coordinates.
//!
//! The field is a fixed hash of the input coordinates (no seed), smoothed by
//! cosine interpolation between integer lattice points and layered into
//! fractal Brownian motion. Identical inputs always produce bit-identical
//! output, which is what lets a planet be regenerated without caching.

mod fbm;
mod lattice;

pub use fbm::{FBM_MAX, OCTAVES, PERSISTENCE, noise3_fbm, noise3_fbm_warped, sample_fbm};
pub use lattice::{noise1, noise2, noise3, noise3_interpolated, random_in_unit_ball};
