//! Manifest persistence
//!
//! Reads and writes manifest files: `{ "models": [ ... ] }`. A manifest
//! that fails to parse is an error surfaced to the caller — records are
//! load-time artifacts and there is no sensible default to fall back to.

use std::fs;
use std::path::Path;

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;
use crate::types::model::ModelConfig;

/// On-disk shape of a manifest file
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ManifestFile {
    /// Registration records, in evaluation order
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

/// Parse manifest JSON into records, preserving order
pub fn parse_manifest_str(json: &str) -> Result<Vec<ModelConfig>, serde_json::Error> {
    let file: ManifestFile = serde_json::from_str(json)?;
    Ok(file.models)
}

/// Load records from a manifest file; errors name the file
pub fn load_manifest(path: &Path) -> Result<Vec<ModelConfig>, StorageError> {
    let json = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let models = parse_manifest_str(&json).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded {} record(s) from {}", models.len(), path.display());
    Ok(models)
}

/// Save records to a manifest file, creating parent directories first
pub fn save_manifest(path: &Path, models: &[ModelConfig]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = ManifestFile {
        models: models.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json)?;

    tracing::debug!("Saved {} record(s) to {}", models.len(), path.display());
    Ok(())
}

/// JSON schema of the manifest file, for authoring tooling
pub fn manifest_schema() -> Result<serde_json::Value, StorageError> {
    Ok(serde_json::to_value(schema_for!(ManifestFile))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.json");
        let models = catalog::models();

        save_manifest(&path, &models).unwrap();
        let loaded = load_manifest(&path).unwrap();
        assert_eq!(models, loaded);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("models.json");

        save_manifest(&path, &catalog::models()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_file_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_malformed_json_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.json");
        std::fs::write(&path, "{ models: oops").unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        // The message must say which file failed to parse
        assert!(err.to_string().contains("models.json"));
    }

    #[test]
    fn test_empty_models_key_is_a_valid_manifest() {
        let models = parse_manifest_str(r#"{ "models": [] }"#).unwrap();
        assert!(models.is_empty());

        // The key itself may be omitted too
        let models = parse_manifest_str("{}").unwrap();
        assert!(models.is_empty());
    }

    #[test]
    fn test_schema_describes_the_models_key() {
        let schema = manifest_schema().unwrap();
        let properties = schema.get("properties").unwrap();
        assert!(properties.get("models").is_some());
    }
}
