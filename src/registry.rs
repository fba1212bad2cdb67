//! Loader strategy registry
//!
//! The closed set of model-loading strategies a record may select, and the
//! process-wide registry that resolves strategy tags to their descriptors.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Model-loading strategy selected by a record's `type` tag.
///
/// This is a closed enumeration: a manifest naming a tag outside this set
/// fails to parse. Wire spellings match the evaluation framework the
/// records are authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LoaderKind {
    /// Local or hub checkpoint generated through its bundled chat template
    #[serde(rename = "HuggingFacewithChatTemplate")]
    HuggingFaceWithChatTemplate,
    /// Base checkpoint prompted as raw text, no chat formatting
    #[serde(rename = "HuggingFaceBaseModel")]
    HuggingFaceBaseModel,
    /// vLLM-served checkpoint with the chat template applied
    #[serde(rename = "VLLMwithChatTemplate")]
    VllmWithChatTemplate,
    /// TurboMind (lmdeploy) backend with the chat template applied
    #[serde(rename = "TurboMindModelwithChatTemplate")]
    TurboMindWithChatTemplate,
}

impl LoaderKind {
    /// Wire tag as it appears in manifests
    pub fn tag(&self) -> &'static str {
        match self {
            LoaderKind::HuggingFaceWithChatTemplate => "HuggingFacewithChatTemplate",
            LoaderKind::HuggingFaceBaseModel => "HuggingFaceBaseModel",
            LoaderKind::VllmWithChatTemplate => "VLLMwithChatTemplate",
            LoaderKind::TurboMindWithChatTemplate => "TurboMindModelwithChatTemplate",
        }
    }

    /// Every known strategy, in seeding order
    pub fn all() -> [LoaderKind; 4] {
        [
            LoaderKind::HuggingFaceWithChatTemplate,
            LoaderKind::HuggingFaceBaseModel,
            LoaderKind::VllmWithChatTemplate,
            LoaderKind::TurboMindWithChatTemplate,
        ]
    }
}

impl std::fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Descriptor for one registered strategy
#[derive(Debug, Clone)]
pub struct LoaderStrategy {
    pub kind: LoaderKind,
    /// Whether conversation turns are formatted through a chat template
    pub chat_template: bool,
    /// Backend that executes the strategy
    pub backend: &'static str,
    pub description: &'static str,
}

impl LoaderStrategy {
    fn for_kind(kind: LoaderKind) -> Self {
        match kind {
            LoaderKind::HuggingFaceWithChatTemplate => Self {
                kind,
                chat_template: true,
                backend: "transformers",
                description: "Chat-template-capable local/hub model",
            },
            LoaderKind::HuggingFaceBaseModel => Self {
                kind,
                chat_template: false,
                backend: "transformers",
                description: "Base model prompted as raw text",
            },
            LoaderKind::VllmWithChatTemplate => Self {
                kind,
                chat_template: true,
                backend: "vllm",
                description: "Chat model served through vLLM",
            },
            LoaderKind::TurboMindWithChatTemplate => Self {
                kind,
                chat_template: true,
                backend: "turbomind",
                description: "Chat model served through TurboMind",
            },
        }
    }
}

/// Registry resolving strategy tags to descriptors.
///
/// Seeded once with every [`LoaderKind`] variant and read-only afterwards;
/// lookups are the only operation a consumer needs.
pub struct LoaderRegistry {
    strategies: DashMap<&'static str, LoaderStrategy>,
}

impl LoaderRegistry {
    /// Create a registry seeded with every known strategy
    pub fn seeded() -> Self {
        let strategies = DashMap::new();
        for kind in LoaderKind::all() {
            strategies.insert(kind.tag(), LoaderStrategy::for_kind(kind));
        }
        Self { strategies }
    }

    /// Resolve a wire tag to its strategy descriptor
    pub fn get(&self, tag: &str) -> Option<LoaderStrategy> {
        self.strategies.get(tag).map(|entry| entry.value().clone())
    }

    /// Descriptor for a kind that already parsed; always present
    pub fn describe(&self, kind: LoaderKind) -> LoaderStrategy {
        self.get(kind.tag())
            .unwrap_or_else(|| LoaderStrategy::for_kind(kind))
    }

    /// Whether a tag names a registered strategy
    pub fn is_registered(&self, tag: &str) -> bool {
        self.strategies.contains_key(tag)
    }

    /// All registered strategies, sorted by tag for stable listings
    pub fn list(&self) -> Vec<LoaderStrategy> {
        let mut strategies: Vec<LoaderStrategy> = self
            .strategies
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        strategies.sort_by_key(|strategy| strategy.kind.tag());
        strategies
    }

    pub fn count(&self) -> usize {
        self.strategies.len()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Process-wide registry, seeded on first use and never mutated afterwards
pub static REGISTRY: Lazy<LoaderRegistry> = Lazy::new(LoaderRegistry::seeded);
