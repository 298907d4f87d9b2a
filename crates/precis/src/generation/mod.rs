//! Greedy autoregressive decoding.
//!
//! The decoder is called once per step with the full sequence generated so
//! far; the highest-scoring token at the last position is appended until
//! either an end-of-sequence token is produced late enough or the length
//! cap is reached.

mod config;
mod greedy;
mod types;

pub use config::GenerationConfig;
pub use greedy::{argmax_last_position, generate, generate_with_cancellation};
pub use types::{GenerationError, GenerationResult, LogitsError};
