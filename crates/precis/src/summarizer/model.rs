//! Core Summarizer implementation.

use super::builder::SummarizerBuilder;
use super::types::{SummarizerError, SummarizerResult};
use crate::codec::TextCodec;
use crate::common::CancellationToken;
use crate::generation::{GenerationConfig, generate_with_cancellation};
use crate::session::{DecoderSession, EncoderContext, EncoderSession};

/// Text in, summary out.
///
/// Runs the codec, the encoder once, the greedy decoding loop and the codec
/// again. Holds no per-request state.
pub struct Summarizer {
    codec: Box<dyn TextCodec>,
    encoder: Box<dyn EncoderSession>,
    decoder: Box<dyn DecoderSession>,
    generation: GenerationConfig,
    prompt_prefix: String,
}

impl Summarizer {
    pub(crate) fn from_builder(builder: SummarizerBuilder) -> Self {
        Self {
            codec: builder.codec,
            encoder: builder.encoder,
            decoder: builder.decoder,
            generation: builder.generation,
            prompt_prefix: builder.prompt_prefix,
        }
    }

    /// Summarize text, running until eos or the length cap.
    pub fn summarize(&self, text: &str) -> SummarizerResult<String> {
        self.summarize_with_cancellation(text, &CancellationToken::never())
    }

    /// Summarize text, giving up once `cancel` fires.
    pub fn summarize_with_cancellation(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> SummarizerResult<String> {
        let ids = self.generate_ids(text, cancel)?;
        let summary = self
            .codec
            .decode(&ids)
            .map_err(SummarizerError::Decoding)?;
        Ok(summary.trim().to_string())
    }

    /// Run everything but the final decode; the seed token is included.
    pub fn generate_ids(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> SummarizerResult<Vec<u32>> {
        let prompt = self.format_prompt(text).ok_or(SummarizerError::EmptyInput)?;

        let encoded = self
            .codec
            .encode(&prompt)
            .map_err(SummarizerError::Encoding)?;
        log::debug!(
            "Encoding {} source tokens ({} valid)",
            encoded.len(),
            encoded.num_valid()
        );

        let hidden_states = self
            .encoder
            .encode(encoded.ids(), encoded.mask())
            .map_err(SummarizerError::Encoder)?;
        let context = EncoderContext::new(hidden_states, encoded.attention_mask)
            .map_err(SummarizerError::Encoder)?;

        let ids =
            generate_with_cancellation(self.decoder.as_ref(), &context, &self.generation, cancel)?;
        Ok(ids)
    }

    /// Trim `text` and prepend the prompt prefix. `None` when nothing is left.
    pub fn format_prompt(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.prompt_prefix, text))
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn prompt_prefix(&self) -> &str {
        &self.prompt_prefix
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("generation", &self.generation)
            .field("prompt_prefix", &self.prompt_prefix)
            .finish()
    }
}
