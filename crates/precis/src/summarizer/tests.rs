//! Tests for the Summarizer module.

use std::sync::{Arc, Mutex};

use ndarray::{Array3, ArrayView2};

use super::*;
use crate::codec::{CodecOptions, TokenizerCodec};
use crate::common::CancellationToken;
use crate::generation::{GenerationConfig, GenerationError};
use crate::model::{ModelBundle, ModelConfig};
use crate::session::{DecoderInput, DecoderSession, EncoderSession, SessionError, SessionResult};
use crate::testing::{WORD_MODEL_CONFIG_JSON, word_tokenizer};

// =============================================================================
// Fixtures
// =============================================================================

const START: u32 = 0;
const EOS: u32 = 1;
const VOCAB: usize = 9;

fn codec() -> TokenizerCodec {
    let config = ModelConfig::from_json(WORD_MODEL_CONFIG_JSON).unwrap();
    TokenizerCodec::new(
        word_tokenizer(),
        config.special_tokens(),
        CodecOptions {
            max_input_length: 16,
            pad_to_max_length: false,
        },
    )
    .unwrap()
}

/// Encoder returning zeros and remembering the ids it was given.
#[derive(Default)]
struct RecordingEncoder {
    seen: Arc<Mutex<Vec<Vec<u32>>>>,
    fail: bool,
    bad_batch: bool,
}

impl EncoderSession for RecordingEncoder {
    fn encode(
        &self,
        input_ids: ArrayView2<'_, u32>,
        _attention_mask: ArrayView2<'_, i64>,
    ) -> SessionResult<Array3<f32>> {
        self.seen
            .lock()
            .unwrap()
            .push(input_ids.iter().copied().collect());
        if self.fail {
            return Err(SessionError::inference(anyhow::anyhow!("encoder fault")));
        }
        let batch = if self.bad_batch { 2 } else { 1 };
        Ok(Array3::zeros((batch, input_ids.dim().1, 4)))
    }
}

/// Decoder emitting `script[step]`, or failing when the script runs out.
struct ScriptedDecoder {
    script: Vec<u32>,
}

impl DecoderSession for ScriptedDecoder {
    fn decode(&self, input: &DecoderInput<'_>) -> SessionResult<Array3<f32>> {
        let step = input.seq_len() - 1;
        let token = *self
            .script
            .get(step)
            .ok_or_else(|| SessionError::inference(anyhow::anyhow!("script exhausted")))?;
        let mut logits = Array3::zeros((1, input.seq_len(), VOCAB));
        logits[[0, input.seq_len() - 1, token as usize]] = 1.0;
        Ok(logits)
    }
}

fn builder_with(encoder: RecordingEncoder, script: &[u32]) -> SummarizerBuilder {
    SummarizerBuilder::new(
        Box::new(codec()),
        Box::new(encoder),
        Box::new(ScriptedDecoder {
            script: script.to_vec(),
        }),
        GenerationConfig::new(START, EOS)
            .with_min_length(0)
            .with_max_length(20),
    )
}

fn summarizer(script: &[u32]) -> Summarizer {
    builder_with(RecordingEncoder::default(), script)
        .build()
        .unwrap()
}

// =============================================================================
// Summarize
// =============================================================================

mod summarize_tests {
    use super::*;

    #[test]
    fn test_summarize_decodes_generated_tokens() {
        let s = summarizer(&[4, 5, 6, EOS]);
        assert_eq!(s.summarize("the cat sat on the mat").unwrap(), "the cat sat");
    }

    #[test]
    fn test_generate_ids_keeps_start_and_eos() {
        let s = summarizer(&[5, EOS]);
        let ids = s
            .generate_ids("the cat", &CancellationToken::never())
            .unwrap();
        assert_eq!(ids, vec![START, 5, EOS]);
    }

    #[test]
    fn test_only_eos_gives_empty_summary() {
        let s = summarizer(&[EOS]);
        assert_eq!(s.summarize("the cat").unwrap(), "");
    }

    #[test]
    fn test_prefix_is_encoded_with_input() {
        let encoder = RecordingEncoder::default();
        let seen = encoder.seen.clone();
        let s = builder_with(encoder, &[4, EOS])
            .prompt_prefix("summarize: ")
            .build()
            .unwrap();

        s.summarize("  the cat  ").unwrap();
        assert_eq!(seen.lock().unwrap().as_slice(), &[vec![3, 4, 5]]);
    }

    #[test]
    fn test_summarizer_is_reusable() {
        let s = summarizer(&[8, EOS]);
        assert_eq!(s.summarize("the mat").unwrap(), "mat");
        assert_eq!(s.summarize("the cat").unwrap(), "mat");
    }
}

// =============================================================================
// Errors
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_empty_input_never_reaches_encoder() {
        let encoder = RecordingEncoder::default();
        let seen = encoder.seen.clone();
        let s = builder_with(encoder, &[EOS]).build().unwrap();

        assert!(matches!(s.summarize(""), Err(SummarizerError::EmptyInput)));
        assert!(matches!(s.summarize(" \n\t"), Err(SummarizerError::EmptyInput)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_encoder_failure() {
        let encoder = RecordingEncoder {
            fail: true,
            ..Default::default()
        };
        let s = builder_with(encoder, &[EOS]).build().unwrap();
        assert!(matches!(
            s.summarize("the cat"),
            Err(SummarizerError::Encoder(SessionError::Inference(_)))
        ));
    }

    #[test]
    fn test_encoder_bad_shape() {
        let encoder = RecordingEncoder {
            bad_batch: true,
            ..Default::default()
        };
        let s = builder_with(encoder, &[EOS]).build().unwrap();
        assert!(matches!(
            s.summarize("the cat"),
            Err(SummarizerError::Encoder(SessionError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_decoder_failure_returns_no_summary() {
        // Script runs out at step 2 with no eos produced.
        let s = summarizer(&[4, 5]);
        let err = s.summarize("the cat").unwrap_err();

        assert!(matches!(
            err,
            SummarizerError::Generation(GenerationError::Decoder { step: 2, .. })
        ));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_cancelled_summarize() {
        let s = summarizer(&[4, EOS]);
        let err = s
            .summarize_with_cancellation("the cat", &CancellationToken::already_cancelled())
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SummarizerError>();
        assert_send_sync::<Summarizer>();
    }
}

// =============================================================================
// Builder
// =============================================================================

mod builder_tests {
    use super::*;

    #[test]
    fn test_length_presets() {
        let s = builder_with(RecordingEncoder::default(), &[EOS])
            .short()
            .build()
            .unwrap();
        assert_eq!(s.generation_config().min_length, 30);
        assert_eq!(s.generation_config().max_length, 60);

        let s = builder_with(RecordingEncoder::default(), &[EOS])
            .medium()
            .build()
            .unwrap();
        assert_eq!(s.generation_config().min_length, 50);
        assert_eq!(s.generation_config().max_length, 150);

        let s = builder_with(RecordingEncoder::default(), &[EOS])
            .long()
            .build()
            .unwrap();
        assert_eq!(s.generation_config().min_length, 100);
        assert_eq!(s.generation_config().max_length, 300);
    }

    #[test]
    fn test_build_rejects_min_above_max() {
        let result = builder_with(RecordingEncoder::default(), &[EOS])
            .min_length(10)
            .max_length(5)
            .build();
        assert!(matches!(result, Err(SummarizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_format_prompt() {
        let s = builder_with(RecordingEncoder::default(), &[EOS])
            .prompt_prefix("summarize: ")
            .build()
            .unwrap();

        assert_eq!(
            s.format_prompt("  some text \n").as_deref(),
            Some("summarize: some text")
        );
        assert_eq!(s.format_prompt("   "), None);
        assert_eq!(s.prompt_prefix(), "summarize: ");
    }

    #[test]
    fn test_from_bundle_uses_model_defaults() {
        let config = ModelConfig::from_json(WORD_MODEL_CONFIG_JSON).unwrap();
        let bundle = ModelBundle {
            config,
            codec: codec(),
            encoder: Box::new(RecordingEncoder::default()),
            decoder: Box::new(ScriptedDecoder { script: vec![EOS] }),
        };

        let s = SummarizerBuilder::from_bundle(bundle).build().unwrap();
        assert_eq!(s.prompt_prefix(), "summarize: ");
        assert_eq!(s.generation_config().start_id, START);
        assert_eq!(s.generation_config().eos_id, EOS);
        assert_eq!(s.generation_config().max_length, 100);
        assert_eq!(s.generation_config().min_length, 30);
    }
}
