//! Built-in model catalog
//!
//! The records this crate registers out of the box. Everything here
//! returns a freshly constructed value: callers get their own copy,
//! nothing is shared or mutable at module level. The catalog is not
//! merged into user manifests automatically; treat it like a preset a
//! harness opts into.

use crate::registry::LoaderKind;
use crate::types::model::{ModelConfig, RunCfg};

/// The sail 8B instruct chat endpoint
pub fn sail_8b_instruct() -> ModelConfig {
    ModelConfig {
        kind: LoaderKind::HuggingFaceWithChatTemplate,
        abbr: "sail_8b_instruct".to_string(),
        path: "sail/Sailor2-8B-Chat".to_string(),
        max_out_len: 1024,
        batch_size: 8,
        run_cfg: RunCfg { num_gpus: 1 },
        stop_words: vec!["<|end_of_text|>".to_string(), "<|eot_id|>".to_string()],
    }
}

/// All built-in records, in evaluation order
pub fn models() -> Vec<ModelConfig> {
    vec![sail_8b_instruct()]
}
