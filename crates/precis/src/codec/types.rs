//! Types for the text codec.

use ndarray::{Array2, ArrayView2};
use thiserror::Error;

/// Errors that can occur while converting between text and token ids.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The tokenizer could not be loaded or configured.
    #[error("Tokenizer setup failed: {0}")]
    Setup(String),

    /// The tokenizer rejected the input text.
    #[error("Failed to encode text: {0}")]
    Encode(String),

    /// The input produced no tokens to feed the encoder.
    #[error("Input produced no tokens")]
    EmptyEncoding,

    /// The tokenizer could not turn ids back into text.
    #[error("Failed to decode tokens: {0}")]
    Decode(String),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Reserved token ids that never show up in decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Seed token fed to the decoder first.
    pub start_id: u32,
    pub eos_id: u32,
    pub pad_id: u32,
}

impl SpecialTokens {
    pub fn contains(&self, id: u32) -> bool {
        id == self.start_id || id == self.eos_id || id == self.pad_id
    }
}

/// Tokenized input, batch size 1.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedText {
    /// Shape: `[1, len]`.
    pub input_ids: Array2<u32>,
    /// Shape: `[1, len]`; `1` for real tokens, `0` for padding.
    pub attention_mask: Array2<i64>,
}

impl EncodedText {
    /// Length including padding.
    pub fn len(&self) -> usize {
        self.input_ids.dim().1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of non-padding positions.
    pub fn num_valid(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m != 0).count()
    }

    pub fn ids(&self) -> ArrayView2<'_, u32> {
        self.input_ids.view()
    }

    pub fn mask(&self) -> ArrayView2<'_, i64> {
        self.attention_mask.view()
    }
}
