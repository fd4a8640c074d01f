//! Noise-displaced icosphere generation.
//!
//! The base icosahedron is split recursively: every triangle appends its
//! three edge midpoints as new vertices and is replaced by four triangles.
//! Midpoints are not shared between neighbouring triangles, so each round
//! adds exactly three vertices per triangle and the mesh carries duplicate
//! positions along every edge. After subdivision each vertex is pushed onto
//! the unit sphere, displaced along its direction by fBm noise, and given the
//! flat normal of the last triangle that references it.

use planetary_math::Vec3;
use planetary_noise::noise3_fbm;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::list::List;
use crate::mesh::{Mesh, Winding};

/// Inputs to [`build_icosphere`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcosphereParams {
    /// Rounds of 1:4 triangle splitting.
    pub subdivisions: u32,
    /// Componentwise multiplier applied to the unit direction before sampling noise.
    pub noise_scale: Vec3,
    /// Added to the scaled direction before sampling noise.
    pub noise_offset: Vec3,
    /// Radial displacement per unit of noise. May be negative.
    pub amplitude: f32,
    pub winding: Winding,
}

impl IcosphereParams {
    /// Largest subdivision count the application accepts (about 5.2M vertices).
    pub const MAX_SUBDIVISIONS: u32 = 9;
}

impl Default for IcosphereParams {
    fn default() -> Self {
        Self {
            subdivisions: 2,
            noise_scale: Vec3::ONE,
            noise_offset: Vec3::ZERO,
            amplitude: 0.1,
            winding: Winding::CounterClockwise,
        }
    }
}

/// Vertices produced by `subdivisions` rounds: `12 + 20 * (4^n - 1)`.
pub fn expected_vertex_count(subdivisions: u32) -> usize {
    12 + 20 * (4usize.pow(subdivisions) - 1)
}

/// Triangles produced by `subdivisions` rounds: `20 * 4^n`.
pub fn expected_triangle_count(subdivisions: u32) -> usize {
    20 * 4usize.pow(subdivisions)
}

/// The 12 golden-ratio vertices and 20 faces of the base icosahedron.
///
/// Vertices are not normalized.
pub fn icosahedron() -> (List<Vec3>, List<u32>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let vertices = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];

    #[rustfmt::skip]
    let indices: [u32; 60] = [
        5, 11, 0,   1, 5, 0,    7, 1, 0,    10, 7, 0,   11, 10, 0,
        9, 5, 1,    4, 11, 5,   2, 10, 11,  6, 7, 10,   8, 1, 7,
        4, 9, 3,    2, 4, 3,    6, 2, 3,    8, 6, 3,    9, 8, 3,
        5, 9, 4,    11, 4, 2,   10, 2, 6,   7, 6, 8,    1, 8, 9,
    ];

    (List::from_slice(&vertices), List::from_slice(&indices))
}

/// One round of 1:4 splitting.
///
/// Appends three midpoints per triangle to `vertices` and returns the
/// replacement index list. For a triangle `(i1, i2, i3)` with midpoints
/// `m1 = mid(v1, v2)`, `m2 = mid(v2, v3)`, `m3 = mid(v3, v1)` the output is
/// `(m1, m2, m3)`, `(i1, m1, m3)`, `(m1, i2, m2)`, `(m3, m2, i3)`.
pub fn subdivide(vertices: &mut List<Vec3>, indices: &List<u32>) -> List<u32> {
    let mut subdivided = List::with_capacity(indices.count() * 4);

    for tri in indices.as_slice().chunks_exact(3) {
        let (i1, i2, i3) = (tri[0], tri[1], tri[2]);
        let v1 = vertices[i1 as usize];
        let v2 = vertices[i2 as usize];
        let v3 = vertices[i3 as usize];

        let m1 = vertices.push(v1.lerp(v2, 0.5)) as u32;
        let m2 = vertices.push(v2.lerp(v3, 0.5)) as u32;
        let m3 = vertices.push(v3.lerp(v1, 0.5)) as u32;

        for index in [m1, m2, m3, i1, m1, m3, m1, i2, m2, m3, m2, i3] {
            subdivided.push(index);
        }
    }

    subdivided
}

/// Moves every vertex onto the unit sphere and then out (or in) along its
/// direction by `noise * amplitude`.
pub fn displace(vertices: &mut List<Vec3>, params: &IcosphereParams) {
    for v in vertices.iter_mut() {
        let dir = v.normalized();
        let sample = dir.mul_elements(params.noise_scale) + params.noise_offset;
        let noise = noise3_fbm(sample.x, sample.y, sample.z);
        *v = dir + dir * (noise * params.amplitude);
    }
}

/// Flat face normals scattered to each triangle's vertices.
///
/// A vertex shared by several triangles keeps the normal of the last one in
/// index order. Vertices no triangle references keep their position.
pub fn face_normals(vertices: &List<Vec3>, indices: &List<u32>) -> Vec<Vec3> {
    let mut normals = vertices.as_slice().to_vec();

    for tri in indices.as_slice().chunks_exact(3) {
        let (i1, i2, i3) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v1 = vertices[i1];
        let edge1 = vertices[i2] - v1;
        let edge2 = vertices[i3] - v1;
        let normal = edge1.cross(edge2).normalized();
        normals[i1] = normal;
        normals[i2] = normal;
        normals[i3] = normal;
    }

    normals
}

/// Builds a displaced icosphere.
///
/// Starts from the 12-vertex, 20-face icosahedron and runs
/// `params.subdivisions` rounds of 1:4 splitting. Midpoints are not shared
/// between neighbouring faces, so every round appends three new vertices per
/// triangle. Each vertex is then pushed along its unit direction by
/// `fbm(dir * noise_scale + noise_offset) * amplitude`, and every vertex
/// takes the normal of the last face written through it.
///
/// `params.subdivisions` is not validated; each round quadruples the
/// triangle count, so callers should stay at or below
/// [`IcosphereParams::MAX_SUBDIVISIONS`].
///
/// # Arguments
///
/// * `params` - Subdivision count, noise sampling and displacement, winding
///
/// # Examples
///
/// ```
/// use planetary_mesh::{IcosphereParams, build_icosphere, expected_vertex_count};
///
/// let mesh = build_icosphere(&IcosphereParams {
///     subdivisions: 1,
///     ..IcosphereParams::default()
/// });
/// assert_eq!(mesh.vertex_count(), expected_vertex_count(1));
/// assert_eq!(mesh.triangle_count(), 80);
/// assert!(mesh.validate().is_ok());
/// ```
pub fn build_icosphere(params: &IcosphereParams) -> Mesh {
    let (mut vertices, mut indices) = icosahedron();

    for round in 0..params.subdivisions {
        indices = subdivide(&mut vertices, &indices);
        debug!(
            "icosphere subdivision {}: {} vertices, {} triangles",
            round + 1,
            vertices.count(),
            indices.count() / 3
        );
    }

    displace(&mut vertices, params);
    let normals = face_normals(&vertices, &indices);

    info!(
        "Built icosphere: {} subdivisions, {} vertices, {} triangles, amplitude {}",
        params.subdivisions,
        vertices.count(),
        indices.count() / 3,
        params.amplitude
    );

    Mesh {
        positions: vertices.into_vec(),
        normals,
        indices: indices.into_vec(),
        indexed: true,
        winding: params.winding,
    }
}
