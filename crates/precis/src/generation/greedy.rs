use std::time::Instant;

use ndarray::{Array2, ArrayView1, ArrayView3, Axis, s};

use super::config::GenerationConfig;
use super::types::{GenerationError, GenerationResult, LogitsError};
use crate::common::CancellationToken;
use crate::session::{DecoderInput, DecoderSession, EncoderContext};

/// Per-call decoding state. Never outlives one `generate` call.
struct GreedyState {
    tokens: Vec<u32>,
    step: usize,
}

impl GreedyState {
    fn new(config: &GenerationConfig) -> Self {
        // max_length is only an upper bound; grow with the output instead.
        Self {
            tokens: vec![config.start_id],
            step: 0,
        }
    }

    fn push(&mut self, token: u32) {
        self.tokens.push(token);
        self.step += 1;
    }
}

/// Run greedy decoding to completion.
///
/// Returns the full sequence, starting with `config.start_id` and ending with
/// `config.eos_id` when decoding stopped on it. Its length never exceeds
/// `config.max_length`.
pub fn generate<D: DecoderSession + ?Sized>(
    decoder: &D,
    encoder: &EncoderContext,
    config: &GenerationConfig,
) -> GenerationResult<Vec<u32>> {
    generate_with_cancellation(decoder, encoder, config, &CancellationToken::never())
}

/// Like [`generate`], but polls `cancel` before each step.
pub fn generate_with_cancellation<D: DecoderSession + ?Sized>(
    decoder: &D,
    encoder: &EncoderContext,
    config: &GenerationConfig,
    cancel: &CancellationToken,
) -> GenerationResult<Vec<u32>> {
    config.validate()?;

    let t_start = Instant::now();
    let mut state = GreedyState::new(config);

    while state.step < config.max_steps() {
        if cancel.is_cancelled() {
            log::info!("[Greedy] Cancelled at step {}", state.step);
            return Err(GenerationError::Cancelled { step: state.step });
        }

        let step = state.step;
        let next_id = greedy_step(decoder, encoder, &state.tokens, step)?;
        state.push(next_id);
        log::trace!("[Greedy] step {} -> token {}", step, next_id);

        if next_id == config.eos_id {
            // The step index, not the new length, is compared to min_length.
            if step >= config.min_length {
                break;
            }
            log::debug!(
                "[Greedy] eos at step {} kept, min_length is {}",
                step,
                config.min_length
            );
        }
    }

    let generated = state.tokens.len() - 1;
    let elapsed = t_start.elapsed();
    if generated > 0 && elapsed.as_secs_f32() > 0.0 {
        log::info!(
            "[Greedy] Generated {} tokens in {:?}. Speed: {:.2} t/s",
            generated,
            elapsed,
            generated as f32 / elapsed.as_secs_f32()
        );
    } else {
        log::info!("[Greedy] Total Generation Time: {:?}", elapsed);
    }

    Ok(state.tokens)
}

fn greedy_step<D: DecoderSession + ?Sized>(
    decoder: &D,
    encoder: &EncoderContext,
    tokens: &[u32],
    step: usize,
) -> GenerationResult<u32> {
    let input_ids = ArrayView1::from(tokens).insert_axis(Axis(0));
    let attention_mask = Array2::<i64>::ones((1, tokens.len()));

    let input = DecoderInput {
        input_ids,
        attention_mask: attention_mask.view(),
        encoder,
    };

    let logits = decoder
        .decode(&input)
        .map_err(|source| GenerationError::Decoder { step, source })?;

    argmax_last_position(logits.view(), tokens.len())
        .map_err(|source| GenerationError::InvalidLogits { step, source })
}

/// Pick the highest-scoring token at the last position of `logits`.
///
/// `logits` must be exactly `[1, seq_len, vocab]`, one row per decoder
/// position. Ties go to the lowest token id. Any NaN score is an error.
pub fn argmax_last_position(
    logits: ArrayView3<'_, f32>,
    seq_len: usize,
) -> Result<u32, LogitsError> {
    let (batch, seq, vocab) = logits.dim();
    if batch != 1 || seq == 0 || seq != seq_len {
        return Err(LogitsError::BadShape {
            seq_len,
            found: logits.shape().to_vec(),
        });
    }
    if vocab == 0 {
        return Err(LogitsError::EmptyVocab);
    }

    let last = logits.slice(s![0, seq - 1, ..]);
    let mut best_id = 0;
    let mut best_score = f32::NEG_INFINITY;
    for (token, &score) in last.iter().enumerate() {
        if score.is_nan() {
            return Err(LogitsError::NaN { token });
        }
        if token == 0 || score > best_score {
            best_id = token;
            best_score = score;
        }
    }
    Ok(best_id as u32)
}
