//! Error types for generation.

use thiserror::Error;

use crate::session::SessionError;

/// Problems with a logits tensor returned by the decoder.
#[derive(Debug, Error, PartialEq)]
pub enum LogitsError {
    #[error("expected logits of shape [1, {seq_len}, vocab], got {found:?}")]
    BadShape { seq_len: usize, found: Vec<usize> },

    #[error("logits have an empty vocabulary dimension")]
    EmptyVocab,

    #[error("NaN logit for token {token}")]
    NaN { token: usize },
}

/// Errors that abort a generation run. No partial sequence is returned.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The configuration violates `1 <= max_length` or `min_length <= max_length`.
    #[error("Invalid generation config: {0}")]
    InvalidConfig(String),

    /// The decoder session failed.
    #[error("Decoder failed at step {step}: {source}")]
    Decoder {
        step: usize,
        #[source]
        source: SessionError,
    },

    /// The decoder returned logits no token can be chosen from.
    #[error("Invalid logits at step {step}: {source}")]
    InvalidLogits {
        step: usize,
        #[source]
        source: LogitsError,
    },

    /// The cancellation token fired before the step could run.
    #[error("Generation cancelled at step {step}")]
    Cancelled { step: usize },
}

impl GenerationError {
    /// Step at which the run stopped, if it got as far as stepping.
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::Decoder { step, .. }
            | Self::InvalidLogits { step, .. }
            | Self::Cancelled { step } => Some(*step),
        }
    }
}

/// Result type for generation.
pub type GenerationResult<T> = Result<T, GenerationError>;
