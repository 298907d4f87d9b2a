//! Fixtures shared by unit tests.

use std::str::FromStr;

use tokenizers::Tokenizer;

/// Whitespace-split word-level tokenizer with a T5-like special token layout:
/// `<pad>`=0 doubles as the decoder start token, `</s>`=1, `<unk>`=2.
pub(crate) const WORD_TOKENIZER_JSON: &str = r#"{
    "version": "1.0",
    "truncation": null,
    "padding": null,
    "added_tokens": [
        {"id": 0, "content": "<pad>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
        {"id": 1, "content": "</s>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
        {"id": 2, "content": "<unk>", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
    ],
    "normalizer": null,
    "pre_tokenizer": {"type": "WhitespaceSplit"},
    "post_processor": null,
    "decoder": null,
    "model": {
        "type": "WordLevel",
        "vocab": {
            "<pad>": 0, "</s>": 1, "<unk>": 2,
            "summarize:": 3, "the": 4, "cat": 5, "sat": 6, "on": 7, "mat": 8
        },
        "unk_token": "<unk>"
    }
}"#;

/// `config.json` matching [`WORD_TOKENIZER_JSON`].
pub(crate) const WORD_MODEL_CONFIG_JSON: &str = r#"{
    "model_type": "t5",
    "vocab_size": 9,
    "d_model": 8,
    "eos_token_id": 1,
    "pad_token_id": 0,
    "decoder_start_token_id": 0,
    "task_specific_params": {
        "summarization": {"prefix": "summarize: ", "max_length": 200, "min_length": 30}
    }
}"#;

pub(crate) fn word_tokenizer() -> Tokenizer {
    Tokenizer::from_str(WORD_TOKENIZER_JSON).unwrap()
}
