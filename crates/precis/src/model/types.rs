use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading model artifacts.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model directory does not exist.
    #[error("Model directory not found: {0}")]
    NotFound(PathBuf),

    /// An artifact exists but could not be read or parsed.
    #[error("Failed to load '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// `config.json` parsed but its values are unusable.
    #[error("Invalid model config: {0}")]
    InvalidConfig(String),

    /// No inference runtime was compiled in.
    #[error("No inference backend available; rebuild with the `onnx` feature")]
    BackendUnavailable,
}

impl ModelError {
    pub(crate) fn load_failed(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::LoadFailed {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type for model loading.
pub type ModelResult<T> = Result<T, ModelError>;
