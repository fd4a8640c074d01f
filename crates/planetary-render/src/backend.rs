//! Boundary between the scene and whatever owns GPU resources.
//!
//! A backend receives finished [`Mesh`] data once, hands back an opaque
//! [`MeshHandle`], and afterwards only sees matrices and draw requests.
//! [`RecordingBackend`] keeps everything in memory so frames can be driven
//! and inspected without a graphics context.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use planetary_math::Mat4;
use planetary_mesh::{Mesh, MeshError, Winding};
use thiserror::Error;
use tracing::{debug, trace};

/// Shader uniform receiving the camera view-projection matrix.
pub const CAMERA_MATRIX_UNIFORM: &str = "u_camera_matrix";
/// Shader uniform receiving the per-object model matrix.
pub const TRANSFORM_MATRIX_UNIFORM: &str = "u_transform_matrix";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("mesh rejected: {0}")]
    InvalidMesh(#[from] MeshError),
    #[error("no mesh uploaded under handle {0:?}")]
    UnknownHandle(MeshHandle),
}

/// Borrowed view of a mesh in the flat layout a graphics API expects.
#[derive(Clone, Copy, Debug)]
pub struct MeshUpload<'a> {
    /// Three floats per vertex.
    pub positions: &'a [f32],
    /// Three floats per vertex, aligned with `positions`.
    pub normals: &'a [f32],
    /// Empty for non-indexed meshes.
    pub indices: &'a [u32],
    pub indexed: bool,
    pub clockwise: bool,
}

impl<'a> MeshUpload<'a> {
    pub fn from_mesh(mesh: &'a Mesh) -> Self {
        Self {
            positions: bytemuck::cast_slice(&mesh.positions),
            normals: bytemuck::cast_slice(&mesh.normals),
            indices: &mesh.indices,
            indexed: mesh.indexed,
            clockwise: mesh.winding == Winding::Clockwise,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of elements a draw call covers: indices when indexed,
    /// vertices otherwise.
    pub fn element_count(&self) -> usize {
        if self.indexed {
            self.indices.len()
        } else {
            self.vertex_count()
        }
    }
}

/// Interleaved vertex for backends that prefer a single vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GpuVertex {
    pub const STRIDE: usize = std::mem::size_of::<GpuVertex>();
}

/// Zips positions and normals into [`GpuVertex`] records.
pub fn interleave(mesh: &Mesh) -> Vec<GpuVertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| GpuVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

/// GPU-side operations the scene depends on.
pub trait RenderBackend {
    /// Copies `mesh` into backend-owned storage.
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<MeshHandle, BackendError>;

    /// Frees the storage behind `handle`. The handle is invalid afterwards.
    fn release_mesh(&mut self, handle: MeshHandle) -> Result<(), BackendError>;

    /// Sets [`CAMERA_MATRIX_UNIFORM`] for subsequent draws.
    fn set_camera_matrix(&mut self, matrix: &Mat4);

    /// Draws `handle` with `model` bound to [`TRANSFORM_MATRIX_UNIFORM`].
    fn draw(&mut self, handle: MeshHandle, model: &Mat4) -> Result<(), BackendError>;
}

/// Mesh storage held by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoredMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub indexed: bool,
    pub clockwise: bool,
}

impl StoredMesh {
    pub fn element_count(&self) -> usize {
        if self.indexed {
            self.indices.len()
        } else {
            self.vertices.len()
        }
    }
}

/// One call observed by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
    Upload {
        handle: MeshHandle,
        vertex_count: usize,
        element_count: usize,
    },
    Release(MeshHandle),
    SetUniform {
        name: &'static str,
        matrix: Mat4,
    },
    Draw {
        handle: MeshHandle,
        element_count: usize,
    },
}

/// In-memory backend that logs every call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    meshes: HashMap<MeshHandle, StoredMesh>,
    calls: Vec<BackendCall>,
    next_handle: u32,
    frame_draws: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&StoredMesh> {
        self.meshes.get(&handle)
    }

    /// Meshes uploaded and not yet released.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Draws recorded since the last camera matrix was set.
    pub fn frame_draws(&self) -> usize {
        self.frame_draws
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<MeshHandle, BackendError> {
        mesh.validate()?;

        let upload = MeshUpload::from_mesh(mesh);
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;

        let stored = StoredMesh {
            vertices: interleave(mesh),
            indices: upload.indices.to_vec(),
            indexed: upload.indexed,
            clockwise: upload.clockwise,
        };
        debug!(
            "Uploaded mesh {:?}: {} vertices, {} elements ({} bytes)",
            handle,
            upload.vertex_count(),
            upload.element_count(),
            stored.vertices.len() * GpuVertex::STRIDE + stored.indices.len() * 4
        );
        self.calls.push(BackendCall::Upload {
            handle,
            vertex_count: upload.vertex_count(),
            element_count: upload.element_count(),
        });
        self.meshes.insert(handle, stored);
        Ok(handle)
    }

    fn release_mesh(&mut self, handle: MeshHandle) -> Result<(), BackendError> {
        self.meshes
            .remove(&handle)
            .ok_or(BackendError::UnknownHandle(handle))?;
        debug!("Released mesh {:?}", handle);
        self.calls.push(BackendCall::Release(handle));
        Ok(())
    }

    fn set_camera_matrix(&mut self, matrix: &Mat4) {
        self.frame_draws = 0;
        self.calls.push(BackendCall::SetUniform {
            name: CAMERA_MATRIX_UNIFORM,
            matrix: *matrix,
        });
    }

    fn draw(&mut self, handle: MeshHandle, model: &Mat4) -> Result<(), BackendError> {
        let element_count = self
            .meshes
            .get(&handle)
            .map(StoredMesh::element_count)
            .ok_or(BackendError::UnknownHandle(handle))?;
        trace!("Draw {:?} ({} elements)", handle, element_count);
        self.calls.push(BackendCall::SetUniform {
            name: TRANSFORM_MATRIX_UNIFORM,
            matrix: *model,
        });
        self.calls.push(BackendCall::Draw {
            handle,
            element_count,
        });
        self.frame_draws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetary_math::Vec3;
    use planetary_mesh::{IcosphereParams, build_icosphere};

    #[test]
    fn test_upload_view_flattens_vectors() {
        let quad = Mesh::quad();
        let upload = MeshUpload::from_mesh(&quad);
        assert_eq!(upload.positions.len(), 18);
        assert_eq!(&upload.positions[..3], &[0.5, -0.5, 0.0]);
        assert_eq!(&upload.normals[..3], &[0.0, 0.0, -1.0]);
        assert_eq!(upload.element_count(), 6);
        assert!(!upload.clockwise);
    }

    #[test]
    fn test_interleave_pairs_position_and_normal() {
        let mesh = build_icosphere(&IcosphereParams::default());
        let vertices = interleave(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(Vec3::from(vertices[7].position), mesh.positions[7]);
        assert_eq!(Vec3::from(vertices[7].normal), mesh.normals[7]);
        assert_eq!(GpuVertex::STRIDE, 24);
    }

    #[test]
    fn test_recording_backend_round_trip() {
        let mut backend = RecordingBackend::new();
        let planet = build_icosphere(&IcosphereParams::default());
        let handle = backend.upload_mesh(&planet).unwrap();
        assert_eq!(backend.live_meshes(), 1);
        assert_eq!(backend.mesh(handle).unwrap().element_count(), 960);

        backend.set_camera_matrix(&Mat4::IDENTITY);
        backend.draw(handle, &Mat4::from_translation(Vec3::ONE)).unwrap();
        assert_eq!(backend.frame_draws(), 1);

        backend.release_mesh(handle).unwrap();
        assert_eq!(backend.live_meshes(), 0);
        assert_eq!(
            backend.calls().last(),
            Some(&BackendCall::Release(handle))
        );
        assert!(matches!(
            backend.draw(handle, &Mat4::IDENTITY),
            Err(BackendError::UnknownHandle(_))
        ));
    }

    #[test]
    fn test_draw_binds_model_matrix_before_draw() {
        let mut backend = RecordingBackend::new();
        let handle = backend.upload_mesh(&Mesh::quad()).unwrap();
        backend.clear_calls();

        let model = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        backend.draw(handle, &model).unwrap();
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::SetUniform {
                    name: "u_transform_matrix",
                    matrix: model
                },
                BackendCall::Draw {
                    handle,
                    element_count: 6
                },
            ]
        );
    }

    #[test]
    fn test_invalid_mesh_is_rejected() {
        let mut backend = RecordingBackend::new();
        let mut mesh = Mesh::quad();
        mesh.normals.pop();
        assert!(matches!(
            backend.upload_mesh(&mesh),
            Err(BackendError::InvalidMesh(MeshError::NormalCountMismatch { .. }))
        ));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_release_unknown_handle() {
        let mut backend = RecordingBackend::new();
        assert!(matches!(
            backend.release_mesh(MeshHandle(42)),
            Err(BackendError::UnknownHandle(MeshHandle(42)))
        ));
    }
}
