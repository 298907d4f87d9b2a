//! Inference sessions for encoder-decoder models.
//!
//! The generation loop never talks to an inference engine directly. It sees
//! two capabilities:
//! - [`EncoderSession`] - source tokens in, hidden states out, once per request
//! - [`DecoderSession`] - generated tokens plus encoder output in, logits out,
//!   once per generated token
//!
//! Engine-specific implementations live in submodules (`onnx`, behind the
//! `onnx` feature).

mod context;
mod traits;
mod types;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use context::{DecoderInput, EncoderContext};
pub use traits::{DecoderSession, EncoderSession};
pub use types::{SessionError, SessionResult};
