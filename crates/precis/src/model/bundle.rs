use std::path::{Path, PathBuf};
use std::time::Instant;

use super::config::ModelConfig;
use super::types::{ModelError, ModelResult};
use crate::codec::{CodecOptions, TokenizerCodec};
use crate::session::{DecoderSession, EncoderSession};

/// File names inside a model directory plus tokenizer settings.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub encoder_file: PathBuf,
    pub decoder_file: PathBuf,
    pub tokenizer_file: PathBuf,
    pub config_file: PathBuf,
    pub codec: CodecOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoder_file: PathBuf::from("encoder_model.onnx"),
            decoder_file: PathBuf::from("decoder_model.onnx"),
            tokenizer_file: PathBuf::from("tokenizer.json"),
            config_file: PathBuf::from("config.json"),
            codec: CodecOptions::default(),
        }
    }
}

/// Everything loaded from a model directory, ready to build a summarizer.
pub struct ModelBundle {
    pub config: ModelConfig,
    pub codec: TokenizerCodec,
    pub encoder: Box<dyn EncoderSession>,
    pub decoder: Box<dyn DecoderSession>,
}

impl ModelBundle {
    /// Load config, tokenizer and both sessions from `dir`.
    pub fn load(dir: impl AsRef<Path>, options: &LoadOptions) -> ModelResult<Self> {
        let dir = dir.as_ref();
        let t_start = Instant::now();

        let config = Self::load_config(dir, options)?;
        let codec = Self::load_codec(dir, &config, options)?;
        let (encoder, decoder) = load_sessions(dir, options)?;

        log::info!(
            "Loaded {} model from {} in {:?}",
            config.model_type.as_deref().unwrap_or("seq2seq"),
            dir.display(),
            t_start.elapsed()
        );

        Ok(Self {
            config,
            codec,
            encoder,
            decoder,
        })
    }

    /// Read `config.json` from `dir`.
    pub fn load_config(dir: &Path, options: &LoadOptions) -> ModelResult<ModelConfig> {
        if !dir.is_dir() {
            return Err(ModelError::NotFound(dir.to_path_buf()));
        }
        ModelConfig::from_file(dir.join(&options.config_file))
    }

    /// Read `tokenizer.json` from `dir` and configure it for `config`.
    pub fn load_codec(
        dir: &Path,
        config: &ModelConfig,
        options: &LoadOptions,
    ) -> ModelResult<TokenizerCodec> {
        let path = dir.join(&options.tokenizer_file);
        TokenizerCodec::from_file(&path, config.special_tokens(), options.codec)
            .map_err(|e| ModelError::load_failed(path, e))
    }
}

#[cfg(feature = "onnx")]
fn load_sessions(
    dir: &Path,
    options: &LoadOptions,
) -> ModelResult<(Box<dyn EncoderSession>, Box<dyn DecoderSession>)> {
    use crate::session::onnx::{OnnxDecoderSession, OnnxEncoderSession};

    let encoder_path = dir.join(&options.encoder_file);
    let encoder = OnnxEncoderSession::from_file(&encoder_path)
        .map_err(|e| ModelError::load_failed(&encoder_path, e))?;

    let decoder_path = dir.join(&options.decoder_file);
    let decoder = OnnxDecoderSession::from_file(&decoder_path)
        .map_err(|e| ModelError::load_failed(&decoder_path, e))?;

    Ok((Box::new(encoder), Box::new(decoder)))
}

#[cfg(not(feature = "onnx"))]
fn load_sessions(
    _dir: &Path,
    _options: &LoadOptions,
) -> ModelResult<(Box<dyn EncoderSession>, Box<dyn DecoderSession>)> {
    Err(ModelError::BackendUnavailable)
}
