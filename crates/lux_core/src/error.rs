//! Errors raised while building a scene.

use thiserror::Error;

/// Errors that can occur while constructing scene primitives.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;
