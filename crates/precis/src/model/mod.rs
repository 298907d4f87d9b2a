//! Model artifacts on disk.
//!
//! A model directory holds an exported encoder graph, an exported decoder
//! graph, `tokenizer.json` and the model's `config.json`:
//!
//! ```text
//! models/onnx_flant5_small/
//! ├── config.json
//! ├── decoder_model.onnx
//! ├── encoder_model.onnx
//! └── tokenizer.json
//! ```

mod bundle;
mod config;
mod types;

pub use bundle::{LoadOptions, ModelBundle};
pub use config::{ModelConfig, SummarizationParams, TaskSpecificParams};
pub use types::{ModelError, ModelResult};
