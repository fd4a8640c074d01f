//! Transform and camera math plus the boundaries a graphics API plugs into:
//! mesh upload and drawing, shader creation, and source file loading.

pub mod backend;
pub mod camera;
pub mod file;
pub mod shader;
pub mod transform;

pub use backend::{
    BackendCall, BackendError, CAMERA_MATRIX_UNIFORM, GpuVertex, MeshHandle, MeshUpload,
    RecordingBackend, RenderBackend, StoredMesh, TRANSFORM_MATRIX_UNIFORM, interleave,
};
pub use camera::{Camera, Projection};
pub use file::{FileError, TextFile};
pub use shader::{
    CompileOutput, LinkOutput, Program, ProgramHandle, ShaderCompiler, ShaderError, ShaderHandle,
    ShaderStage, create_program,
};
pub use transform::Transform;
