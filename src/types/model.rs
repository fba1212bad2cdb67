//! Model registration records
//!
//! The declarative record describing how the evaluation harness invokes
//! one chat-style model endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::registry::LoaderKind;

/// Resource request attached to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunCfg {
    /// Number of GPUs the runner should allocate for this model
    pub num_gpus: u32,
}

impl Default for RunCfg {
    fn default() -> Self {
        Self { num_gpus: 1 }
    }
}

/// Declarative record describing how to instantiate and call one model
/// endpoint.
///
/// Constructed once at configuration-load time and immutable afterwards.
/// The record never validates or loads anything itself; the runner reads
/// it and fails on its own terms (see [`crate::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelConfig {
    /// Model-loading strategy the runner should use
    #[serde(rename = "type")]
    pub kind: LoaderKind,
    /// Short identifier used in reports and logs; unique within a run
    pub abbr: String,
    /// Weights locator: local path or hub identifier
    pub path: String,
    /// Maximum generated tokens per request
    pub max_out_len: u32,
    /// Requests grouped per inference call
    pub batch_size: u32,
    /// Resource request for the runner
    #[serde(default)]
    pub run_cfg: RunCfg,
    /// Generation-terminating strings; may be empty
    #[serde(default)]
    pub stop_words: Vec<String>,
}

impl ModelConfig {
    /// Create a record with the framework's usual limits: 1024 tokens out,
    /// batches of 8, one GPU, no stop words.
    pub fn new(kind: LoaderKind, abbr: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            abbr: abbr.into(),
            path: path.into(),
            max_out_len: 1024,
            batch_size: 8,
            run_cfg: RunCfg::default(),
            stop_words: Vec::new(),
        }
    }
}
