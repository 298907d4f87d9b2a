//! Precis - greedy encoder-decoder summarization.
//!
//! This crate turns text into a summary by running a pretrained
//! sequence-to-sequence model through two inference sessions: an encoder,
//! invoked once per request, and a decoder, invoked once per generated token.
//!
//! The model runtime is pluggable. Anything implementing [`EncoderSession`] and
//! [`DecoderSession`] can drive generation; ONNX Runtime sessions are available
//! behind the `onnx` feature.
//!
//! # Quick Start
//!
//! ```ignore
//! use precis::model::{LoadOptions, ModelBundle};
//! use precis::summarizer::SummarizerBuilder;
//!
//! let bundle = ModelBundle::load("models/onnx_flant5_small", &LoadOptions::default())?;
//! let summarizer = SummarizerBuilder::from_bundle(bundle).medium().build()?;
//!
//! let summary = summarizer.summarize(&article)?;
//! ```

pub mod codec;
pub mod common;
pub mod generation;
pub mod model;
pub mod session;
pub mod summarizer;

#[cfg(test)]
mod testing;

// Re-export main API
pub use codec::{CodecError, CodecResult, EncodedText, SpecialTokens, TextCodec, TokenizerCodec};
pub use common::{CancellationHandle, CancellationToken};
pub use generation::{
    GenerationConfig, GenerationError, GenerationResult, generate, generate_with_cancellation,
};
pub use model::{LoadOptions, ModelBundle, ModelConfig, ModelError, ModelResult};
pub use session::{
    DecoderInput, DecoderSession, EncoderContext, EncoderSession, SessionError, SessionResult,
};
pub use summarizer::{Summarizer, SummarizerBuilder, SummarizerError, SummarizerResult};

/// Get the precis version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
