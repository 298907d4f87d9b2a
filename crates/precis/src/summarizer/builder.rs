//! Builder pattern for Summarizer configuration.

use super::model::Summarizer;
use super::types::{SummarizerError, SummarizerResult};
use crate::codec::TextCodec;
use crate::generation::GenerationConfig;
use crate::model::ModelBundle;
use crate::session::{DecoderSession, EncoderSession};

/// Builder for configuring a Summarizer instance.
pub struct SummarizerBuilder {
    pub(crate) codec: Box<dyn TextCodec>,
    pub(crate) encoder: Box<dyn EncoderSession>,
    pub(crate) decoder: Box<dyn DecoderSession>,
    pub(crate) generation: GenerationConfig,
    pub(crate) prompt_prefix: String,
}

impl SummarizerBuilder {
    /// Create a builder from already loaded parts. No prompt prefix is set.
    pub fn new(
        codec: Box<dyn TextCodec>,
        encoder: Box<dyn EncoderSession>,
        decoder: Box<dyn DecoderSession>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            codec,
            encoder,
            decoder,
            generation,
            prompt_prefix: String::new(),
        }
    }

    /// Create a builder from a loaded model directory.
    ///
    /// Uses the model's own summarization prefix (`"summarize: "` for T5)
    /// and its special tokens.
    pub fn from_bundle(bundle: ModelBundle) -> Self {
        let generation = bundle.config.generation_config();
        let prefix = bundle
            .config
            .summarization_prefix()
            .unwrap_or_default()
            .to_string();
        Self::new(Box::new(bundle.codec), bundle.encoder, bundle.decoder, generation)
            .prompt_prefix(prefix)
    }

    // =========================================================================
    // Length Presets
    // =========================================================================

    /// Short summaries (30-60 tokens).
    pub fn short(self) -> Self {
        self.min_length(30).max_length(60)
    }

    /// Medium summaries (50-150 tokens).
    pub fn medium(self) -> Self {
        self.min_length(50).max_length(150)
    }

    /// Long summaries (100-300 tokens).
    pub fn long(self) -> Self {
        self.min_length(100).max_length(300)
    }

    // =========================================================================
    // Length Control
    // =========================================================================

    /// Set minimum summary length.
    pub fn min_length(mut self, len: usize) -> Self {
        self.generation.min_length = len;
        self
    }

    /// Set maximum summary length, seed token included.
    pub fn max_length(mut self, len: usize) -> Self {
        self.generation.max_length = len;
        self
    }

    /// Replace the whole generation config.
    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation = config;
        self
    }

    // =========================================================================
    // Prompt
    // =========================================================================

    /// Text prepended to every input before encoding.
    pub fn prompt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prompt_prefix = prefix.into();
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    pub fn build(self) -> SummarizerResult<Summarizer> {
        self.generation
            .validate()
            .map_err(|e| SummarizerError::InvalidConfig(e.to_string()))?;
        Ok(Summarizer::from_builder(self))
    }
}

impl std::fmt::Debug for SummarizerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerBuilder")
            .field("generation", &self.generation)
            .field("prompt_prefix", &self.prompt_prefix)
            .finish()
    }
}
