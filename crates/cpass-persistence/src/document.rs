//! Stored batch document.

use chrono::{DateTime, Utc};
use cpass_model::{BatchId, OnboardingBatch};
use serde::{Deserialize, Serialize};

/// Current schema version of stored batch documents.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// One onboarded batch as written to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub schema_version: u32,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339, refreshed on every save.
    pub last_saved_at: String,
    pub batch: OnboardingBatch,
}

impl BatchDocument {
    pub fn new(batch: OnboardingBatch) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: now.clone(),
            last_saved_at: now,
            batch,
        }
    }

    /// Update the last saved timestamp.
    pub fn touch(&mut self) {
        self.last_saved_at = Utc::now().to_rfc3339();
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn listing(&self) -> BatchListing {
        BatchListing {
            batch_id: self.batch.batch_id.clone(),
            workers: self.batch.workers.len(),
            total_rows: self.batch.total_rows,
            skills: self
                .batch
                .workers
                .iter()
                .map(|w| w.skill_count())
                .sum(),
            last_saved_at: self.last_saved_at.clone(),
        }
    }
}

/// Summary line for a stored batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchListing {
    pub batch_id: BatchId,
    pub workers: usize,
    pub total_rows: usize,
    /// Deduplicated skill matches across the batch's workers.
    pub skills: usize,
    pub last_saved_at: String,
}
