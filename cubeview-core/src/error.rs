/// Errors raised while setting up or presenting a scene
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("edge {edge} references vertex {index}, but the wireframe has {vertex_count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("expected {expected} vertex positions, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },

    #[error("failed to load texture '{name}': {reason}")]
    TextureLoad { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
