//! Persistent storage
//!
//! Data-directory resolution and manifest persistence.

pub mod manifest;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not resolve a data directory for this platform")]
    NoDataDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Per-user data directory holding the global manifest.
///
/// Windows: %APPDATA%/modelreg, Linux: ~/.local/share/modelreg,
/// macOS: ~/Library/Application Support/modelreg.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "modelreg", "modelreg")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
