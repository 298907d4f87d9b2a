//! ONNX Runtime sessions for exported encoder/decoder graphs.
//!
//! Expects the two-file layout produced by the usual seq2seq export:
//! `encoder_model.onnx` (inputs `input_ids`, `attention_mask`) and
//! `decoder_model.onnx` (inputs `input_ids`, `encoder_hidden_states`,
//! `encoder_attention_mask`, output `logits`). Token ids are fed as `int64`.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array3, ArrayView2, Ix3};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;

use super::context::{DecoderInput, EncoderContext};
use super::traits::{DecoderSession, EncoderSession};
use super::types::{SessionError, SessionResult};

const DECODER_MASK_INPUT: &str = "decoder_attention_mask";
const LOGITS_OUTPUT: &str = "logits";

fn open_session(path: &Path) -> Result<Session> {
    let session = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .commit_from_file(path)
        .with_context(|| format!("failed to load ONNX graph from {}", path.display()))?;
    log::debug!(
        "Loaded {}: inputs {:?}, outputs {:?}",
        path.display(),
        session.inputs.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        session.outputs.iter().map(|o| o.name.as_str()).collect::<Vec<_>>()
    );
    Ok(session)
}

fn ids_tensor(ids: ArrayView2<'_, u32>) -> SessionResult<Tensor<i64>> {
    Tensor::from_array(ids.mapv(i64::from)).map_err(SessionError::inference)
}

fn mask_tensor(mask: ArrayView2<'_, i64>) -> SessionResult<Tensor<i64>> {
    Tensor::from_array(mask.to_owned()).map_err(SessionError::inference)
}

fn extract_3d(outputs: &ort::session::SessionOutputs<'_, '_>, name: &str) -> SessionResult<Array3<f32>> {
    let value = outputs
        .get(name)
        .ok_or_else(|| SessionError::MissingOutput(name.to_string()))?;
    let view = value
        .try_extract_tensor::<f32>()
        .map_err(SessionError::inference)?;
    let shape = view.shape().to_vec();
    let view = view
        .into_dimensionality::<Ix3>()
        .map_err(|_| SessionError::ShapeMismatch {
            name: name.to_string(),
            expected: "[batch, seq, dim]".to_string(),
            found: shape,
        })?;
    Ok(view.to_owned())
}

/// Encoder half of an exported seq2seq model.
pub struct OnnxEncoderSession {
    session: Session,
    output_name: String,
}

impl OnnxEncoderSession {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let session = open_session(path.as_ref())?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .context("encoder graph declares no outputs")?;
        Ok(Self {
            session,
            output_name,
        })
    }
}

impl EncoderSession for OnnxEncoderSession {
    fn encode(
        &self,
        input_ids: ArrayView2<'_, u32>,
        attention_mask: ArrayView2<'_, i64>,
    ) -> SessionResult<Array3<f32>> {
        let inputs = ort::inputs![
            "input_ids" => ids_tensor(input_ids)?,
            "attention_mask" => mask_tensor(attention_mask)?,
        ]
        .map_err(SessionError::inference)?;

        let outputs = self.session.run(inputs).map_err(SessionError::inference)?;
        extract_3d(&outputs, &self.output_name)
    }
}

/// Encoder tensors converted to runtime values once per request.
struct EncoderValues {
    hidden_states: Tensor<f32>,
    attention_mask: Tensor<i64>,
}

impl EncoderValues {
    fn from_context(encoder: &EncoderContext) -> SessionResult<Self> {
        log::debug!(
            "Preparing encoder values: source length {}, hidden size {}",
            encoder.source_len(),
            encoder.hidden_size()
        );
        Ok(Self {
            hidden_states: Tensor::from_array(encoder.hidden_states().clone())
                .map_err(SessionError::inference)?,
            attention_mask: mask_tensor(encoder.attention_mask().view())?,
        })
    }
}

/// Decoder half of an exported seq2seq model, without past key/values.
pub struct OnnxDecoderSession {
    session: Session,
    /// Some exports take an explicit decoder mask, most do not.
    takes_decoder_mask: bool,
}

impl OnnxDecoderSession {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let session = open_session(path.as_ref())?;
        if !session.outputs.iter().any(|o| o.name == LOGITS_OUTPUT) {
            anyhow::bail!(
                "decoder graph {} has no '{}' output",
                path.as_ref().display(),
                LOGITS_OUTPUT
            );
        }
        let takes_decoder_mask = session.inputs.iter().any(|i| i.name == DECODER_MASK_INPUT);
        Ok(Self {
            session,
            takes_decoder_mask,
        })
    }
}

impl DecoderSession for OnnxDecoderSession {
    fn decode(&self, input: &DecoderInput<'_>) -> SessionResult<Array3<f32>> {
        // Only the growing input_ids are converted per step.
        let encoder = input.encoder.prepared(EncoderValues::from_context)?;

        let mut inputs: Vec<(Cow<'_, str>, SessionInputValue<'_>)> = vec![
            (
                Cow::Borrowed("input_ids"),
                SessionInputValue::from(ids_tensor(input.input_ids)?),
            ),
            (
                Cow::Borrowed("encoder_hidden_states"),
                SessionInputValue::from(&encoder.hidden_states),
            ),
            (
                Cow::Borrowed("encoder_attention_mask"),
                SessionInputValue::from(&encoder.attention_mask),
            ),
        ];

        if self.takes_decoder_mask {
            let mask = mask_tensor(input.attention_mask)?;
            inputs.push((Cow::Borrowed(DECODER_MASK_INPUT), SessionInputValue::from(mask)));
        }

        let outputs = self.session.run(inputs).map_err(SessionError::inference)?;
        let logits = extract_3d(&outputs, LOGITS_OUTPUT)?;

        let (batch, seq, _) = logits.dim();
        if batch != 1 || seq != input.seq_len() {
            return Err(SessionError::ShapeMismatch {
                name: LOGITS_OUTPUT.to_string(),
                expected: format!("[1, {}, vocab]", input.seq_len()),
                found: logits.shape().to_vec(),
            });
        }
        Ok(logits)
    }
}
