use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::{ModelError, ModelResult};
use crate::codec::SpecialTokens;
use crate::generation::GenerationConfig;

/// The subset of a Hugging Face `config.json` that generation needs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub model_type: Option<String>,
    pub vocab_size: usize,
    #[serde(default, alias = "hidden_size")]
    pub d_model: Option<usize>,

    pub eos_token_id: u32,
    pub pad_token_id: u32,
    /// Missing on some exports; the pad token is used instead.
    #[serde(default)]
    pub decoder_start_token_id: Option<u32>,

    #[serde(default)]
    pub task_specific_params: Option<TaskSpecificParams>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskSpecificParams {
    #[serde(default)]
    pub summarization: Option<SummarizationParams>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummarizationParams {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min_length: Option<usize>,
}

impl ModelConfig {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| ModelError::load_failed(path, e))?;
        let config: Self =
            serde_json::from_str(&json).map_err(|e| ModelError::load_failed(path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ModelResult<()> {
        let vocab = self.vocab_size;
        for (name, id) in [
            ("eos_token_id", self.eos_token_id),
            ("pad_token_id", self.pad_token_id),
            ("decoder_start_token_id", self.start_token_id()),
        ] {
            if id as usize >= vocab {
                return Err(ModelError::InvalidConfig(format!(
                    "{} {} is outside the vocabulary (size {})",
                    name, id, vocab
                )));
            }
        }
        Ok(())
    }

    /// Token that seeds the decoder.
    pub fn start_token_id(&self) -> u32 {
        self.decoder_start_token_id.unwrap_or(self.pad_token_id)
    }

    pub fn special_tokens(&self) -> SpecialTokens {
        SpecialTokens {
            start_id: self.start_token_id(),
            eos_id: self.eos_token_id,
            pad_id: self.pad_token_id,
        }
    }

    /// Default generation settings for this model.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig::new(self.start_token_id(), self.eos_token_id)
    }

    /// Task prefix the model was trained with for summarization, if any.
    pub fn summarization_prefix(&self) -> Option<&str> {
        self.task_specific_params
            .as_ref()?
            .summarization
            .as_ref()?
            .prefix
            .as_deref()
    }
}
