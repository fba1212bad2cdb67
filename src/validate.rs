//! Record validation
//!
//! The consumer-side contract: a runner refuses a sequence of records it
//! cannot work with before spending GPU-hours on it. Records are never
//! repaired or clamped here — they are load-time artifacts and stay as
//! authored.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::hub::WeightsLocation;
use crate::system::gpu::GpuInventory;
use crate::types::model::ModelConfig;

/// Abbrs end up in report paths and log lines, so they are restricted to
/// a safe-identifier shape.
static ABBR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("abbr pattern is valid"));

/// Reasons a runner must refuse a sequence of records
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record {index} has an empty abbr")]
    EmptyAbbr { index: usize },
    #[error("abbr '{abbr}' contains characters unsafe for reporting")]
    InvalidAbbr { abbr: String },
    #[error("abbr '{abbr}' appears more than once")]
    DuplicateAbbr { abbr: String },
    #[error("model '{abbr}': max_out_len must be greater than zero")]
    ZeroMaxOutLen { abbr: String },
    #[error("model '{abbr}': batch_size must be greater than zero")]
    ZeroBatchSize { abbr: String },
    #[error("model '{abbr}': weights path '{path}' does not resolve ({reason})")]
    UnresolvablePath {
        abbr: String,
        path: String,
        reason: String,
    },
    #[error("model '{abbr}' requests {requested} GPU(s) but only {available} available")]
    InsufficientGpus {
        abbr: String,
        requested: u32,
        available: u32,
    },
}

/// Validate a sequence of records the way a runner must before using it.
///
/// Machine-independent checks only: identifiers, limits, and weights-path
/// shape. Resource requests are checked separately by
/// [`validate_resources`] because they depend on the machine, not the
/// records.
pub fn validate_models(models: &[ModelConfig]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, model) in models.iter().enumerate() {
        if model.abbr.is_empty() {
            return Err(ValidationError::EmptyAbbr { index });
        }
        if !ABBR_PATTERN.is_match(&model.abbr) {
            return Err(ValidationError::InvalidAbbr {
                abbr: model.abbr.clone(),
            });
        }
        if !seen.insert(&model.abbr) {
            return Err(ValidationError::DuplicateAbbr {
                abbr: model.abbr.clone(),
            });
        }
        if model.max_out_len == 0 {
            return Err(ValidationError::ZeroMaxOutLen {
                abbr: model.abbr.clone(),
            });
        }
        if model.batch_size == 0 {
            return Err(ValidationError::ZeroBatchSize {
                abbr: model.abbr.clone(),
            });
        }
        if let Err(reason) = WeightsLocation::parse(&model.path) {
            return Err(ValidationError::UnresolvablePath {
                abbr: model.abbr.clone(),
                path: model.path.clone(),
                reason: reason.to_string(),
            });
        }
    }

    Ok(())
}

/// Check resource requests against this machine's inventory
pub fn validate_resources(
    models: &[ModelConfig],
    inventory: &GpuInventory,
) -> Result<(), ValidationError> {
    for model in models {
        if !inventory.can_fit(model.run_cfg.num_gpus) {
            return Err(ValidationError::InsufficientGpus {
                abbr: model.abbr.clone(),
                requested: model.run_cfg.num_gpus,
                available: inventory.num_gpus,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::registry::LoaderKind;

    fn record(abbr: &str) -> ModelConfig {
        ModelConfig::new(
            LoaderKind::HuggingFaceWithChatTemplate,
            abbr,
            "sail/Sailor2-8B-Chat",
        )
    }

    #[test]
    fn test_builtin_catalog_validates_clean() {
        assert!(validate_models(&catalog::models()).is_ok());
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        assert!(validate_models(&[]).is_ok());
    }

    #[test]
    fn test_empty_abbr_is_rejected() {
        let models = vec![record("ok"), record("")];
        assert_eq!(
            validate_models(&models),
            Err(ValidationError::EmptyAbbr { index: 1 })
        );
    }

    #[test]
    fn test_unsafe_abbr_is_rejected() {
        let models = vec![record("has spaces in it")];
        assert!(matches!(
            validate_models(&models),
            Err(ValidationError::InvalidAbbr { .. })
        ));
    }

    #[test]
    fn test_duplicate_abbr_is_rejected() {
        let models = vec![record("sail_8b_instruct"), record("sail_8b_instruct")];
        assert_eq!(
            validate_models(&models),
            Err(ValidationError::DuplicateAbbr {
                abbr: "sail_8b_instruct".to_string()
            })
        );
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let mut zero_out = record("zero_out");
        zero_out.max_out_len = 0;
        assert!(matches!(
            validate_models(&[zero_out]),
            Err(ValidationError::ZeroMaxOutLen { .. })
        ));

        let mut zero_batch = record("zero_batch");
        zero_batch.batch_size = 0;
        assert!(matches!(
            validate_models(&[zero_batch]),
            Err(ValidationError::ZeroBatchSize { .. })
        ));
    }

    #[test]
    fn test_placeholder_path_is_rejected() {
        let mut model = record("placeholder");
        model.path = "terter".to_string();
        assert!(matches!(
            validate_models(&[model]),
            Err(ValidationError::UnresolvablePath { .. })
        ));
    }

    #[test]
    fn test_resources_checked_against_inventory() {
        let mut model = record("big");
        model.run_cfg.num_gpus = 4;

        let small = GpuInventory::with_gpus(1);
        assert_eq!(
            validate_resources(&[model.clone()], &small),
            Err(ValidationError::InsufficientGpus {
                abbr: "big".to_string(),
                requested: 4,
                available: 1,
            })
        );

        let large = GpuInventory::with_gpus(8);
        assert!(validate_resources(&[model], &large).is_ok());
    }

    #[test]
    fn test_zero_gpu_request_always_fits() {
        let mut model = record("cpu_only");
        model.run_cfg.num_gpus = 0;
        assert!(validate_resources(&[model], &GpuInventory::default()).is_ok());
    }
}
