//! Planet mesh generation: the displaced icosphere builder, the CPU-side
//! [`Mesh`] it produces, and the swap-remove [`List`] it is built with.

pub mod icosphere;
pub mod list;
pub mod mesh;

pub use icosphere::{
    IcosphereParams, build_icosphere, expected_triangle_count, expected_vertex_count, icosahedron,
    subdivide,
};
pub use list::List;
pub use mesh::{Mesh, MeshError, Winding};
