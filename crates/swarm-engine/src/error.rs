use std::path::PathBuf;

/// Errors surfaced by renderer initialization and per-frame work.
///
/// Any error returned from `InstancedCircleRenderer::init` leaves no renderer
/// behind; the caller decides whether to build a new one.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// No adapter, device or surface could be acquired.
    #[error("GPU device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The WGSL source file could not be read.
    #[error("failed to read shader source {path:?}")]
    ShaderLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The WGSL source failed to parse or validate.
    #[error("shader failed to compile: {0}")]
    ShaderCompile(String),

    /// More objects were requested than the instance buffers can hold.
    #[error("requested {requested} objects but buffers hold at most {capacity}")]
    BufferOverflow { requested: usize, capacity: usize },

    #[error("invalid renderer configuration: {0}")]
    InvalidConfig(String),

    /// The surface reported an unrecoverable error (commonly out of memory).
    #[error("drawing surface lost")]
    SurfaceLost,
}

pub type Result<T, E = RendererError> = std::result::Result<T, E>;
