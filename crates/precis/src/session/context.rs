//! Per-request tensors shared between the encoder and every decoding step.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use ndarray::{Array2, Array3, ArrayView2};

use super::types::{SessionError, SessionResult};

/// The encoder output for one request.
///
/// Built once after the encoder runs and then only ever borrowed: every
/// decoding step reads the same hidden states and validity mask. A decoder
/// backend that needs the tensors in its own format converts them once via
/// [`EncoderContext::prepared`] and reuses the result for later steps.
pub struct EncoderContext {
    /// Shape: `[1, src_len, hidden]`.
    hidden_states: Array3<f32>,
    /// Shape: `[1, src_len]`; `1` marks real tokens, `0` padding.
    attention_mask: Array2<i64>,
    prepared: OnceLock<Box<dyn Any + Send + Sync>>,
}

impl EncoderContext {
    /// Pair encoder hidden states with the source validity mask.
    ///
    /// Both must have batch size 1 and agree on the source length.
    pub fn new(hidden_states: Array3<f32>, attention_mask: Array2<i64>) -> SessionResult<Self> {
        let (batch, src_len, _hidden) = hidden_states.dim();
        if batch != 1 {
            return Err(SessionError::ShapeMismatch {
                name: "encoder_hidden_states".to_string(),
                expected: "[1, src_len, hidden]".to_string(),
                found: hidden_states.shape().to_vec(),
            });
        }
        if attention_mask.dim() != (1, src_len) {
            return Err(SessionError::ShapeMismatch {
                name: "encoder_attention_mask".to_string(),
                expected: format!("[1, {}]", src_len),
                found: attention_mask.shape().to_vec(),
            });
        }
        Ok(Self {
            hidden_states,
            attention_mask,
            prepared: OnceLock::new(),
        })
    }

    /// Backend-specific form of this context, built by `init` on first use.
    ///
    /// Later calls return the stored value without running `init`. Only one
    /// backend type can be stored per context; asking for another fails.
    pub fn prepared<T, F>(&self, init: F) -> SessionResult<&T>
    where
        T: Any + Send + Sync,
        F: FnOnce(&Self) -> SessionResult<T>,
    {
        if self.prepared.get().is_none() {
            let value = init(self)?;
            // On a lost race the first stored value is kept.
            let _ = self.prepared.set(Box::new(value));
        }
        self.prepared
            .get()
            .and_then(|value| value.downcast_ref::<T>())
            .ok_or_else(|| {
                SessionError::inference(anyhow::anyhow!(
                    "encoder context already prepared for a different backend"
                ))
            })
    }

    pub fn hidden_states(&self) -> &Array3<f32> {
        &self.hidden_states
    }

    pub fn attention_mask(&self) -> &Array2<i64> {
        &self.attention_mask
    }

    /// Number of source positions, padding included.
    pub fn source_len(&self) -> usize {
        self.hidden_states.dim().1
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_states.dim().2
    }
}

impl fmt::Debug for EncoderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderContext")
            .field("hidden_states", &self.hidden_states.shape())
            .field("attention_mask", &self.attention_mask.shape())
            .field("prepared", &self.prepared.get().is_some())
            .finish()
    }
}

/// Everything a decoder session receives for one step.
#[derive(Debug, Clone, Copy)]
pub struct DecoderInput<'a> {
    /// Tokens generated so far, seed token first. Shape: `[1, seq]`.
    pub input_ids: ArrayView2<'a, u32>,
    /// All ones, same shape as `input_ids`.
    pub attention_mask: ArrayView2<'a, i64>,
    /// Encoder output for this request.
    pub encoder: &'a EncoderContext,
}

impl DecoderInput<'_> {
    /// Current decoder sequence length.
    pub fn seq_len(&self) -> usize {
        self.input_ids.dim().1
    }

    /// The most recently appended token.
    pub fn last_token(&self) -> Option<u32> {
        self.input_ids.iter().last().copied()
    }
}
