//! Service configuration.
//!
//! Loaded once at startup with the priority:
//! CLI flags > `--config <path>` > ./precis.toml > ~/.config/precis/config.toml > defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use precis::codec::CodecOptions;
use precis::model::LoadOptions;
use serde::{Deserialize, Serialize};

/// Top-level precis configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address and request handling
    #[serde(default)]
    pub server: ServerSection,

    /// Model artifact locations
    #[serde(default)]
    pub model: ModelSection,

    /// Decoding and input settings
    #[serde(default)]
    pub generation: GenerationSection,
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests still decoding after this many seconds fail with a 500.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 2850 }

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelSection {
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_encoder_file")]
    pub encoder_file: PathBuf,
    #[serde(default = "default_decoder_file")]
    pub decoder_file: PathBuf,
    #[serde(default = "default_tokenizer_file")]
    pub tokenizer_file: PathBuf,
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            encoder_file: default_encoder_file(),
            decoder_file: default_decoder_file(),
            tokenizer_file: default_tokenizer_file(),
            config_file: default_config_file(),
        }
    }
}

fn default_model_dir() -> PathBuf { PathBuf::from("models/onnx_flant5_small") }
fn default_encoder_file() -> PathBuf { PathBuf::from("encoder_model.onnx") }
fn default_decoder_file() -> PathBuf { PathBuf::from("decoder_model.onnx") }
fn default_tokenizer_file() -> PathBuf { PathBuf::from("tokenizer.json") }
fn default_config_file() -> PathBuf { PathBuf::from("config.json") }

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationSection {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
    #[serde(default = "default_true")]
    pub pad_to_max_length: bool,
    #[serde(default = "default_prompt_prefix")]
    pub prompt_prefix: String,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_length: default_min_length(),
            max_input_length: default_max_input_length(),
            pad_to_max_length: true,
            prompt_prefix: default_prompt_prefix(),
        }
    }
}

fn default_max_length() -> usize { 100 }
fn default_min_length() -> usize { 30 }
fn default_max_input_length() -> usize { 512 }
fn default_true() -> bool { true }
fn default_prompt_prefix() -> String { "summarize: ".into() }

// =============================================================================
// Derived settings
// =============================================================================

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        if generation.max_length == 0 {
            bail!("generation.max_length must be at least 1");
        }
        if generation.min_length > generation.max_length {
            bail!(
                "generation.min_length ({}) must not exceed generation.max_length ({})",
                generation.min_length,
                generation.max_length
            );
        }
        if generation.max_input_length == 0 {
            bail!("generation.max_input_length must be at least 1");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.server.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            encoder_file: self.model.encoder_file.clone(),
            decoder_file: self.model.decoder_file.clone(),
            tokenizer_file: self.model.tokenizer_file.clone(),
            config_file: self.model.config_file.clone(),
            codec: CodecOptions {
                max_input_length: self.generation.max_input_length,
                pad_to_max_length: self.generation.pad_to_max_length,
            },
        }
    }
}

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_dir: Option<PathBuf>,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = self.model_dir {
            config.model.dir = dir;
        }
        if let Some(max) = self.max_length {
            config.generation.max_length = max;
        }
        if let Some(min) = self.min_length {
            config.generation.min_length = min;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.server.request_timeout_secs = Some(secs);
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load configuration, preferring an explicit path when one is given.
pub fn load_config(explicit: Option<&Path>) -> Result<ServerConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    // Try local first
    if let Some(config) = try_load_from_path("./precis.toml")? {
        return Ok(config);
    }

    // Try user config
    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("precis").join("config.toml");
        if let Some(config) = try_load_from_path(&user_config)? {
            return Ok(config);
        }
    }

    Ok(ServerConfig::default())
}

/// Load from specific path.
pub fn load_config_from_path(path: &Path) -> Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ServerConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_from_path(path: impl AsRef<Path>) -> Result<Option<ServerConfig>> {
    let path = path.as_ref();
    if path.exists() {
        Ok(Some(load_config_from_path(path)?))
    } else {
        Ok(None)
    }
}
