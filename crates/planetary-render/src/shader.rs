//! Shader program creation on top of a pluggable compiler.

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::{error, info};

use crate::file::{FileError, TextFile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Result of compiling one stage. `diagnostics` is set when compilation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOutput {
    pub handle: ShaderHandle,
    pub diagnostics: Option<String>,
}

/// Result of linking a program. `diagnostics` is set when linking failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkOutput {
    pub program: ProgramHandle,
    pub diagnostics: Option<String>,
}

/// The graphics API's shader compiler and linker.
pub trait ShaderCompiler {
    fn compile(&mut self, stage: ShaderStage, source: &str) -> CompileOutput;
    fn link(&mut self, vertex: ShaderHandle, fragment: ShaderHandle) -> LinkOutput;
    fn delete_shader(&mut self, shader: ShaderHandle);
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to load {stage} shader source: {source}")]
    Source {
        stage: ShaderStage,
        #[source]
        source: FileError,
    },
}

/// A linked program handle.
///
/// Compile and link failures are logged rather than returned, so the handle
/// may refer to an unusable program; `healthy` records whether every step
/// succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Program {
    pub handle: ProgramHandle,
    pub healthy: bool,
}

fn compile_stage<C: ShaderCompiler + ?Sized>(
    compiler: &mut C,
    stage: ShaderStage,
    path: &Path,
) -> Result<CompileOutput, ShaderError> {
    let file = TextFile::load(path).map_err(|source| ShaderError::Source { stage, source })?;
    let output = compiler.compile(stage, file.text());
    file.release();

    if let Some(log) = &output.diagnostics {
        error!("{} shader compilation failed ({}): {}", stage, path.display(), log);
    }
    Ok(output)
}

/// Loads, compiles and links a vertex + fragment program.
///
/// Steps, in order:
/// - read and compile the vertex stage, then the fragment stage
/// - link the two into a program
/// - delete both intermediate shader objects
///
/// Compile and link diagnostics are logged at `error` level and recorded in
/// [`Program::healthy`]; the program handle is returned either way. Only an
/// unreadable source file is an error, and the vertex shader is deleted
/// before a fragment read failure is returned.
///
/// # Arguments
///
/// * `compiler` - Graphics API boundary that compiles, links and deletes
/// * `vertex_path` - Vertex shader source file
/// * `fragment_path` - Fragment shader source file
///
/// # Examples
///
/// ```no_run
/// use planetary_render::{Program, ShaderCompiler, ShaderError, create_program};
///
/// fn planet_program(compiler: &mut impl ShaderCompiler) -> Result<Program, ShaderError> {
///     let program = create_program(compiler, "shaders/planet.vert", "shaders/planet.frag")?;
///     if !program.healthy {
///         eprintln!("planet shader built with errors, see the log");
///     }
///     Ok(program)
/// }
/// ```
pub fn create_program<C: ShaderCompiler + ?Sized>(
    compiler: &mut C,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<Program, ShaderError> {
    let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());
    info!(
        "Creating shader program from {} and {}",
        vertex_path.display(),
        fragment_path.display()
    );

    let vertex = compile_stage(compiler, ShaderStage::Vertex, vertex_path)?;
    let fragment = match compile_stage(compiler, ShaderStage::Fragment, fragment_path) {
        Ok(fragment) => fragment,
        Err(e) => {
            compiler.delete_shader(vertex.handle);
            return Err(e);
        }
    };

    let linked = compiler.link(vertex.handle, fragment.handle);
    if let Some(log) = &linked.diagnostics {
        error!("shader program link failed: {}", log);
    }
    compiler.delete_shader(vertex.handle);
    compiler.delete_shader(fragment.handle);

    Ok(Program {
        handle: linked.program,
        healthy: vertex.diagnostics.is_none()
            && fragment.diagnostics.is_none()
            && linked.diagnostics.is_none(),
    })
}
