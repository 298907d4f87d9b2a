//! Types for summarization.

use thiserror::Error;

use crate::codec::CodecError;
use crate::generation::GenerationError;
use crate::session::SessionError;

/// Errors that can occur during summarization.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// Input was empty or whitespace only.
    #[error("No text provided")]
    EmptyInput,

    /// The codec could not tokenize the input.
    #[error("Encoding failed: {0}")]
    Encoding(#[source] CodecError),

    /// The encoder session failed or returned unusable hidden states.
    #[error("Encoder failed: {0}")]
    Encoder(#[source] SessionError),

    /// The decoding loop failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Generated ids could not be turned back into text.
    #[error("Decoding failed: {0}")]
    Decoding(#[source] CodecError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SummarizerError {
    /// Whether the failure came from a fired cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Generation(GenerationError::Cancelled { .. })
        )
    }
}

/// Result type for summarization operations.
pub type SummarizerResult<T> = Result<T, SummarizerError>;
