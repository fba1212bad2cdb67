//! Run manifests
//!
//! One evaluation run's ordered, immutable snapshot of registration
//! records, with enough provenance to correlate parallel runs in logs.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::model::ModelConfig;

/// Ordered snapshot of records for a single run.
///
/// Each run loads its own copy; nothing here is shared or mutated after
/// construction. Order is evaluation order for sequential runners.
#[derive(Debug, Clone)]
pub struct Manifest {
    models: Vec<ModelConfig>,
    origin: String,
    run_id: Uuid,
    loaded_at: DateTime<Utc>,
}

impl Manifest {
    /// Snapshot a sequence of records for one run
    pub fn new(models: Vec<ModelConfig>, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let run_id = Uuid::new_v4();
        tracing::debug!(
            "Manifest {} loaded from {}: {} record(s)",
            run_id,
            origin,
            models.len()
        );
        Self {
            models,
            origin,
            run_id,
            loaded_at: Utc::now(),
        }
    }

    /// Records in evaluation order
    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    /// Look up a record by its abbr
    pub fn get(&self, abbr: &str) -> Option<&ModelConfig> {
        self.models.iter().find(|model| model.abbr == abbr)
    }

    /// Where the records came from, for logs and reports
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Identifier of this loaded copy
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// When this copy was loaded
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Consume the snapshot, handing the records to the runner
    pub fn into_models(self) -> Vec<ModelConfig> {
        self.models
    }
}
