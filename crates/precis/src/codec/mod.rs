//! Conversion between text and token ids.
//!
//! [`TextCodec`] is the seam the summarizer talks to; [`TokenizerCodec`]
//! implements it on top of a Hugging Face `tokenizer.json`.

mod tokenizer;
mod types;

pub use tokenizer::{CodecOptions, TokenizerCodec};
pub use types::{CodecError, CodecResult, EncodedText, SpecialTokens};

/// Turns text into model input and model output back into text.
pub trait TextCodec: Send + Sync {
    /// Tokenize `text` into a batch-of-one input with its validity mask.
    ///
    /// Long input is truncated, never rejected.
    fn encode(&self, text: &str) -> CodecResult<EncodedText>;

    /// Turn generated ids back into text, dropping start/eos/pad tokens.
    fn decode(&self, ids: &[u32]) -> CodecResult<String>;
}

impl<T: TextCodec + ?Sized> TextCodec for Box<T> {
    fn encode(&self, text: &str) -> CodecResult<EncodedText> {
        (**self).encode(text)
    }

    fn decode(&self, ids: &[u32]) -> CodecResult<String> {
        (**self).decode(ids)
    }
}

impl<T: TextCodec + ?Sized> TextCodec for std::sync::Arc<T> {
    fn encode(&self, text: &str) -> CodecResult<EncodedText> {
        (**self).encode(text)
    }

    fn decode(&self, ids: &[u32]) -> CodecResult<String> {
        (**self).decode(ids)
    }
}
