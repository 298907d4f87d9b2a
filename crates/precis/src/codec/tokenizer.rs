//! `tokenizers`-backed codec.

use std::path::Path;

use ndarray::{Array1, Axis};
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams,
};

use super::TextCodec;
use super::types::{CodecError, CodecResult, EncodedText, SpecialTokens};

/// Tokenizer-level options applied once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Input is truncated to this many tokens, special tokens included.
    pub max_input_length: usize,
    /// Pad every input up to `max_input_length`.
    pub pad_to_max_length: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_input_length: 512,
            pad_to_max_length: true,
        }
    }
}

/// A [`TextCodec`] over a Hugging Face tokenizer.
pub struct TokenizerCodec {
    tokenizer: Tokenizer,
    special: SpecialTokens,
    options: CodecOptions,
}

impl TokenizerCodec {
    pub fn new(
        mut tokenizer: Tokenizer,
        special: SpecialTokens,
        options: CodecOptions,
    ) -> CodecResult<Self> {
        if options.max_input_length == 0 {
            return Err(CodecError::Setup(
                "max_input_length must be greater than 0".to_string(),
            ));
        }

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: options.max_input_length,
                ..Default::default()
            }))
            .map_err(|e| CodecError::Setup(e.to_string()))?;

        if options.pad_to_max_length {
            let pad_token = tokenizer
                .id_to_token(special.pad_id)
                .unwrap_or_else(|| "<pad>".to_string());
            tokenizer.with_padding(Some(PaddingParams {
                strategy: PaddingStrategy::Fixed(options.max_input_length),
                direction: PaddingDirection::Right,
                pad_id: special.pad_id,
                pad_token,
                ..Default::default()
            }));
        } else {
            tokenizer.with_padding(None);
        }

        Ok(Self {
            tokenizer,
            special,
            options,
        })
    }

    /// Load `tokenizer.json` from disk.
    pub fn from_file(
        path: impl AsRef<Path>,
        special: SpecialTokens,
        options: CodecOptions,
    ) -> CodecResult<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| CodecError::Setup(format!("{}: {}", path.display(), e)))?;
        Self::new(tokenizer, special, options)
    }

    pub fn special_tokens(&self) -> SpecialTokens {
        self.special
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Vocabulary size including added tokens.
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

impl TextCodec for TokenizerCodec {
    fn encode(&self, text: &str) -> CodecResult<EncodedText> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        let ids = encoding.get_ids().to_vec();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();

        let encoded = EncodedText {
            input_ids: Array1::from(ids).insert_axis(Axis(0)),
            attention_mask: Array1::from(mask).insert_axis(Axis(0)),
        };
        if encoded.num_valid() == 0 {
            return Err(CodecError::EmptyEncoding);
        }

        log::debug!(
            "Encoded input: {} tokens ({} valid)",
            encoded.len(),
            encoded.num_valid()
        );
        Ok(encoded)
    }

    fn decode(&self, ids: &[u32]) -> CodecResult<String> {
        let kept: Vec<u32> = ids
            .iter()
            .copied()
            .filter(|&id| !self.special.contains(id))
            .collect();
        self.tokenizer
            .decode(&kept, true)
            .map_err(|e| CodecError::Decode(e.to_string()))
    }
}
