//! CPU-side triangle mesh handed to the render backend.

use planetary_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Front-face vertex order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    #[default]
    CounterClockwise,
    /// Used for shells viewed from inside, such as an atmosphere.
    Clockwise,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("{normals} normals for {positions} positions")]
    NormalCountMismatch { positions: usize, normals: usize },
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("non-indexed mesh has {0} vertices, not a multiple of 3")]
    PartialTriangleList(usize),
}

/// Positions and normals are index-aligned. For an indexed mesh every
/// triple of `indices` is one triangle; otherwise every triple of positions is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub indexed: bool,
    pub winding: Winding,
}

impl Mesh {
    /// Unit quad in the XY plane facing -Z, as a plain triangle list.
    pub fn quad() -> Self {
        let positions = vec![
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
        ];
        let normals = vec![Vec3::back(1.0); positions.len()];
        Self {
            positions,
            normals,
            indices: Vec::new(),
            indexed: false,
            winding: Winding::CounterClockwise,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.indexed {
            self.indices.len() / 3
        } else {
            self.positions.len() / 3
        }
    }

    /// Checks the structural invariants a backend relies on before upload.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        if !self.indexed {
            if self.positions.len() % 3 != 0 {
                return Err(MeshError::PartialTriangleList(self.positions.len()));
            }
            return Ok(());
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.indices.len()));
        }
        let vertex_count = self.positions.len();
        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                slot,
                index,
                vertex_count,
            });
        }
        Ok(())
    }
}
