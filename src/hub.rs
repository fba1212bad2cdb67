//! Weights locators
//!
//! Classifies a record's `path` into a local filesystem location or a
//! HuggingFace hub repository identifier. Classification only — whether
//! and how weights get fetched is the runner's business.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a record's weights live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsLocation {
    /// Existing file on this machine (e.g. a single-file checkpoint)
    LocalFile(PathBuf),
    /// Existing directory of checkpoint shards and config
    LocalDir(PathBuf),
    /// Hub repository reference
    HubRepo { repo_id: String, revision: String },
}

/// Errors raised while classifying a weights path
#[derive(Debug, Error)]
pub enum HubError {
    #[error("empty weights path")]
    Empty,
    #[error("not an existing local path or a hub id: '{0}'")]
    Unrecognized(String),
    #[error("invalid hub repository id: '{0}'")]
    InvalidRepoId(String),
}

impl WeightsLocation {
    /// Classify a record's `path`.
    ///
    /// Accepted forms:
    /// 1. an existing local file or directory
    /// 2. https://huggingface.co/org/name, optionally with /tree|blob|resolve/REV
    /// 3. org/name or org/name@revision
    ///
    /// An existing local path wins over a hub-shaped string, so a checked-out
    /// `org/name` directory resolves locally.
    pub fn parse(path: &str) -> Result<Self, HubError> {
        let raw = path.trim();
        if raw.is_empty() {
            return Err(HubError::Empty);
        }

        let candidate = Path::new(raw);
        if candidate.is_file() {
            return Ok(WeightsLocation::LocalFile(candidate.to_path_buf()));
        }
        if candidate.is_dir() {
            return Ok(WeightsLocation::LocalDir(candidate.to_path_buf()));
        }

        // Strip query and fragment before hub parsing
        let raw = raw.split('?').next().unwrap_or(raw);
        let raw = raw.split('#').next().unwrap_or(raw);

        if raw.contains("huggingface.co") {
            return Self::parse_hub_url(raw);
        }

        // Short form: org/name or org/name@revision
        let (repo, revision) = match raw.split_once('@') {
            Some((repo, revision)) if !revision.is_empty() => (repo, revision.to_string()),
            Some(_) => return Err(HubError::InvalidRepoId(raw.to_string())),
            None => (raw, "main".to_string()),
        };

        let segments: Vec<&str> = repo.split('/').collect();
        if segments.len() == 2 && segments.iter().all(|s| is_valid_segment(s)) {
            return Ok(WeightsLocation::HubRepo {
                repo_id: repo.to_string(),
                revision,
            });
        }

        Err(HubError::Unrecognized(path.to_string()))
    }

    /// Parse a huggingface.co URL, with or without a scheme
    fn parse_hub_url(url: &str) -> Result<Self, HubError> {
        let path = match url.split_once("huggingface.co/") {
            Some((_, rest)) => rest,
            None => return Err(HubError::InvalidRepoId(url.to_string())),
        };

        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() < 2 || !is_valid_segment(parts[0]) || !is_valid_segment(parts[1]) {
            return Err(HubError::InvalidRepoId(url.to_string()));
        }

        let repo_id = format!("{}/{}", parts[0], parts[1]);
        let revision = parts
            .iter()
            .position(|&p| p == "tree" || p == "blob" || p == "resolve")
            .and_then(|pos| parts.get(pos + 1))
            .map(|rev| rev.to_string())
            .unwrap_or_else(|| "main".to_string());

        Ok(WeightsLocation::HubRepo { repo_id, revision })
    }

    /// True when the weights are already present on this machine
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            WeightsLocation::LocalFile(_) | WeightsLocation::LocalDir(_)
        )
    }
}

/// Hub id segments: alphanumeric plus the separators the hub allows
fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_short_repo_id() {
        let location = WeightsLocation::parse("sail/Sailor2-8B-Chat").unwrap();
        assert_eq!(
            location,
            WeightsLocation::HubRepo {
                repo_id: "sail/Sailor2-8B-Chat".to_string(),
                revision: "main".to_string(),
            }
        );
        assert!(!location.is_local());
    }

    #[test]
    fn test_parse_repo_id_with_revision() {
        let location = WeightsLocation::parse("sail/Sailor2-8B-Chat@v1.0").unwrap();
        assert_eq!(
            location,
            WeightsLocation::HubRepo {
                repo_id: "sail/Sailor2-8B-Chat".to_string(),
                revision: "v1.0".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_full_url_with_revision() {
        let url = "https://huggingface.co/meta-llama/Meta-Llama-3-8B-Instruct/tree/refs-pr-1";
        let location = WeightsLocation::parse(url).unwrap();
        assert_eq!(
            location,
            WeightsLocation::HubRepo {
                repo_id: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
                revision: "refs-pr-1".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_full_url_without_revision() {
        let location = WeightsLocation::parse("https://huggingface.co/Qwen/Qwen2.5-7B").unwrap();
        assert_eq!(
            location,
            WeightsLocation::HubRepo {
                repo_id: "Qwen/Qwen2.5-7B".to_string(),
                revision: "main".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_schemeless_hub_url() {
        let location = WeightsLocation::parse("huggingface.co/sail/Sailor2-8B-Chat").unwrap();
        assert_eq!(
            location,
            WeightsLocation::HubRepo {
                repo_id: "sail/Sailor2-8B-Chat".to_string(),
                revision: "main".to_string(),
            }
        );
    }

    #[test]
    fn test_existing_local_file_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("model.gguf");
        fs::write(&file, b"gguf").unwrap();

        let location = WeightsLocation::parse(file.to_str().unwrap()).unwrap();
        assert_eq!(location, WeightsLocation::LocalFile(file));
        assert!(location.is_local());
    }

    #[test]
    fn test_local_dir_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let location = WeightsLocation::parse(dir.path().to_str().unwrap()).unwrap();
        assert!(matches!(location, WeightsLocation::LocalDir(_)));
    }

    #[test]
    fn test_placeholder_string_is_rejected() {
        // Single segment, not an existing path: the classic placeholder
        assert!(matches!(
            WeightsLocation::parse("terter"),
            Err(HubError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_empty_and_malformed_paths_are_rejected() {
        assert!(matches!(WeightsLocation::parse("  "), Err(HubError::Empty)));
        assert!(matches!(
            WeightsLocation::parse("org/name@"),
            Err(HubError::InvalidRepoId(_))
        ));
        assert!(matches!(
            WeightsLocation::parse("https://huggingface.co/onlyorg"),
            Err(HubError::InvalidRepoId(_))
        ));
        // Bare host, nothing after it
        assert!(matches!(
            WeightsLocation::parse("huggingface.co"),
            Err(HubError::InvalidRepoId(_))
        ));
        assert!(matches!(
            WeightsLocation::parse("./missing/dir/model.gguf"),
            Err(HubError::Unrecognized(_))
        ));
    }
}
