//! Error types for inference sessions.

use thiserror::Error;

/// Errors raised by an encoder or decoder session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A tensor did not have the shape the session or the caller requires.
    #[error("Shape mismatch for '{name}': expected {expected}, got {found:?}")]
    ShapeMismatch {
        name: String,
        expected: String,
        found: Vec<usize>,
    },

    /// The session produced no output with the expected name.
    #[error("Session produced no output named '{0}'")]
    MissingOutput(String),

    /// The inference runtime reported a failure.
    #[error("Inference failed: {0}")]
    Inference(#[source] anyhow::Error),
}

impl SessionError {
    /// Wrap any runtime error as an inference failure.
    pub fn inference(err: impl Into<anyhow::Error>) -> Self {
        Self::Inference(err.into())
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
