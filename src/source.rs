//! Manifest sources
//!
//! Where registration records come from: the built-in catalog, single
//! manifest files, and fragment directories. `load_effective_manifest`
//! layers them the way the harness expects: global configuration first,
//! then project-local files, later entries overriding earlier ones that
//! share an abbr.
//!
//! The built-in catalog is NOT layered in automatically; it is a preset
//! a harness opts into via [`BuiltinSource`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

use crate::catalog;
use crate::storage::{self, manifest::parse_manifest_str};
use crate::types::manifest::Manifest;
use crate::types::model::ModelConfig;

/// File name of the global and project-local manifests
pub const MANIFEST_FILE: &str = "models.json";
/// Project-local configuration directory
pub const LOCAL_CONFIG_DIR: &str = ".modelreg";
/// Fragment directory inside the local configuration directory
pub const FRAGMENT_DIR: &str = "models.d";

/// Errors raised while gathering records from a source
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {}", .0.display())]
    NotFound(PathBuf),
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
    #[error("invalid fragment directory {}: {}", .dir.display(), .reason)]
    FragmentDir { dir: PathBuf, reason: String },
}

/// A place registration records are gathered from
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Human-readable provenance for logs and [`Manifest::origin`]
    fn describe(&self) -> String;
    /// Load the records this source contributes, in order
    async fn load(&self) -> Result<Vec<ModelConfig>, ManifestError>;
}

/// The records compiled into the crate
pub struct BuiltinSource;

#[async_trait]
impl ManifestSource for BuiltinSource {
    fn describe(&self) -> String {
        "builtin catalog".to_string()
    }

    async fn load(&self) -> Result<Vec<ModelConfig>, ManifestError> {
        Ok(catalog::models())
    }
}

/// A single manifest file. Missing files are an error here: a source
/// named explicitly is expected to exist.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManifestSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }

    async fn load(&self) -> Result<Vec<ModelConfig>, ManifestError> {
        if !self.path.exists() {
            return Err(ManifestError::NotFound(self.path.clone()));
        }
        read_manifest_file(&self.path).await
    }
}

/// Every `*.json` under a directory, visited in sorted path order so
/// authors control evaluation order by file naming.
pub struct FragmentDirSource {
    dir: PathBuf,
}

impl FragmentDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ManifestSource for FragmentDirSource {
    fn describe(&self) -> String {
        format!("fragments {}", self.dir.display())
    }

    async fn load(&self) -> Result<Vec<ModelConfig>, ManifestError> {
        let pattern = self.dir.join("*.json");
        let pattern = pattern.to_str().ok_or_else(|| ManifestError::FragmentDir {
            dir: self.dir.clone(),
            reason: "non-UTF-8 path".to_string(),
        })?;

        // A matched entry that cannot be read is an error, not a skip
        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|e| ManifestError::FragmentDir {
                dir: self.dir.clone(),
                reason: e.to_string(),
            })?
            .collect::<Result<_, _>>()
            .map_err(|e| ManifestError::FragmentDir {
                dir: self.dir.clone(),
                reason: e.to_string(),
            })?;
        paths.sort();

        let mut models = Vec::new();
        for path in paths {
            let mut fragment = read_manifest_file(&path).await?;
            tracing::debug!(
                "Fragment {} contributed {} record(s)",
                path.display(),
                fragment.len()
            );
            models.append(&mut fragment);
        }
        Ok(models)
    }
}

async fn read_manifest_file(path: &Path) -> Result<Vec<ModelConfig>, ManifestError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_manifest_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge records in order: the first occurrence of an abbr fixes its
/// position, a later record with the same abbr replaces it there.
pub fn merge_models(base: &mut Vec<ModelConfig>, extra: Vec<ModelConfig>) {
    for model in extra {
        match base.iter_mut().find(|existing| existing.abbr == model.abbr) {
            Some(slot) => *slot = model,
            None => base.push(model),
        }
    }
}

/// Gather the effective manifest.
///
/// Layers, lowest to highest precedence:
/// 1. global `<data_dir>/models.json`
/// 2. project-local `./.modelreg/models.json`
/// 3. project-local fragments `./.modelreg/models.d/*.json`
///
/// Missing layers are skipped. A layer that exists but fails to parse is
/// an error — malformed records must never be silently dropped.
pub async fn load_effective_manifest() -> Result<Manifest, ManifestError> {
    let global_manifest = storage::get_data_dir()
        .ok()
        .map(|dir| dir.join(MANIFEST_FILE));
    load_layered_manifest(global_manifest.as_deref(), Path::new(LOCAL_CONFIG_DIR)).await
}

/// Layer a global manifest file and a project configuration directory
/// (its `models.json`, then its `models.d/` fragments) into one manifest.
async fn load_layered_manifest(
    global_manifest: Option<&Path>,
    config_dir: &Path,
) -> Result<Manifest, ManifestError> {
    let mut models = Vec::new();
    let mut layers = Vec::new();

    if let Some(global_path) = global_manifest {
        if global_path.exists() {
            merge_models(&mut models, read_manifest_file(global_path).await?);
            tracing::info!("Loaded global manifest from {}", global_path.display());
            layers.push(format!("global {}", global_path.display()));
        } else {
            tracing::debug!("No global manifest at {}", global_path.display());
        }
    }

    let local_path = config_dir.join(MANIFEST_FILE);
    if local_path.exists() {
        merge_models(&mut models, read_manifest_file(&local_path).await?);
        tracing::info!("Loaded local manifest from {}", local_path.display());
        layers.push(format!("local {}", local_path.display()));
    } else {
        tracing::debug!("No local manifest at {}", local_path.display());
    }

    let fragment_dir = config_dir.join(FRAGMENT_DIR);
    if fragment_dir.is_dir() {
        let fragments = FragmentDirSource::new(&fragment_dir);
        merge_models(&mut models, fragments.load().await?);
        layers.push(fragments.describe());
    }

    let origin = if layers.is_empty() {
        "no manifest layers found".to_string()
    } else {
        layers.join(" + ")
    };
    Ok(Manifest::new(models, origin))
}
