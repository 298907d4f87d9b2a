//! Capability traits for the two inference sessions of an encoder-decoder model.

use std::sync::Arc;

use ndarray::{Array3, ArrayView2};

use super::context::DecoderInput;
use super::types::SessionResult;

/// Runs the encoder half of a seq2seq model.
///
/// Implementations are loaded once and shared by every in-flight request, so
/// `encode` takes `&self` and must be safe to call concurrently.
pub trait EncoderSession: Send + Sync {
    /// Encode a batch-of-one token sequence.
    ///
    /// `input_ids` and `attention_mask` have shape `[1, src_len]`. Returns the
    /// hidden states, shape `[1, src_len, hidden]`.
    fn encode(
        &self,
        input_ids: ArrayView2<'_, u32>,
        attention_mask: ArrayView2<'_, i64>,
    ) -> SessionResult<Array3<f32>>;
}

/// Runs one decoder step of a seq2seq model.
///
/// The decoder is stateless from the caller's point of view: each call gets
/// the full sequence generated so far.
pub trait DecoderSession: Send + Sync {
    /// Returns logits of shape `[1, seq, vocab]`, one row for every position
    /// of `input.input_ids`. Any other shape fails the step.
    fn decode(&self, input: &DecoderInput<'_>) -> SessionResult<Array3<f32>>;
}

impl<T: EncoderSession + ?Sized> EncoderSession for Box<T> {
    fn encode(
        &self,
        input_ids: ArrayView2<'_, u32>,
        attention_mask: ArrayView2<'_, i64>,
    ) -> SessionResult<Array3<f32>> {
        (**self).encode(input_ids, attention_mask)
    }
}

impl<T: EncoderSession + ?Sized> EncoderSession for Arc<T> {
    fn encode(
        &self,
        input_ids: ArrayView2<'_, u32>,
        attention_mask: ArrayView2<'_, i64>,
    ) -> SessionResult<Array3<f32>> {
        (**self).encode(input_ids, attention_mask)
    }
}

impl<T: DecoderSession + ?Sized> DecoderSession for Box<T> {
    fn decode(&self, input: &DecoderInput<'_>) -> SessionResult<Array3<f32>> {
        (**self).decode(input)
    }
}

impl<T: DecoderSession + ?Sized> DecoderSession for Arc<T> {
    fn decode(&self, input: &DecoderInput<'_>) -> SessionResult<Array3<f32>> {
        (**self).decode(input)
    }
}
