//! modelreg Library
//!
//! Model registration records for an evaluation harness: typed
//! configuration for each candidate model, a closed registry of loader
//! strategies, manifest sources with layered merging, and the
//! validation an evaluation run performs before touching a GPU.

pub mod catalog;
pub mod hub;
pub mod registry;
pub mod source;
pub mod stop;
pub mod storage;
pub mod system;
pub mod types;
pub mod validate;

pub use registry::{LoaderKind, LoaderRegistry, REGISTRY};
pub use types::manifest::Manifest;
pub use types::model::{ModelConfig, RunCfg};
