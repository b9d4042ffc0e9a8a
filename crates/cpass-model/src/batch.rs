use serde::{Deserialize, Serialize};

use crate::enums::DataTier;
use crate::ids::BatchId;
use crate::mapping::ColumnMapping;
use crate::worker::WorkerRecord;

/// Result of onboarding one uploaded sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingBatch {
    pub batch_id: BatchId,
    pub data_tier: Option<DataTier>,
    pub mappings: Vec<ColumnMapping>,
    pub workers: Vec<WorkerRecord>,
    /// Data rows in the upload.
    pub total_rows: usize,
    /// Matches dropped because they named a skill missing from the taxonomy.
    #[serde(default)]
    pub rejected_matches: usize,
    /// True when the caller stopped the batch before the last row.
    #[serde(default)]
    pub stopped_early: bool,
}

impl OnboardingBatch {
    pub fn worker(&self, worker_id: &str) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.worker_id == worker_id)
    }
}
