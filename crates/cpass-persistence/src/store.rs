//! Worker store abstraction.

use std::collections::BTreeMap;

use cpass_model::{BatchId, OnboardingBatch};

use crate::document::{BatchDocument, BatchListing};
use crate::error::{PersistenceError, Result};

/// Where onboarded batches live.
///
/// Saving a batch id that already exists replaces it and keeps its
/// creation time.
pub trait WorkerStore {
    fn save_batch(&mut self, batch: &OnboardingBatch) -> Result<()>;

    /// Errors with [`PersistenceError::BatchNotFound`] for unknown ids.
    fn load_batch(&self, batch_id: &BatchId) -> Result<OnboardingBatch>;

    /// Stored batches ordered by batch id.
    fn list_batches(&self) -> Result<Vec<BatchListing>>;

    /// Returns whether a batch was removed.
    fn delete_batch(&mut self, batch_id: &BatchId) -> Result<bool>;

    fn contains_batch(&self, batch_id: &BatchId) -> Result<bool> {
        Ok(self
            .list_batches()?
            .iter()
            .any(|listing| &listing.batch_id == batch_id))
    }
}

/// Store backed by a map. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkerStore {
    documents: BTreeMap<BatchId, BatchDocument>,
}

impl InMemoryWorkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `batches`.
    pub fn with_batches(batches: impl IntoIterator<Item = OnboardingBatch>) -> Self {
        let documents = batches
            .into_iter()
            .map(|batch| (batch.batch_id.clone(), BatchDocument::new(batch)))
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, batch_id: &BatchId) -> Option<&BatchDocument> {
        self.documents.get(batch_id)
    }
}

impl WorkerStore for InMemoryWorkerStore {
    fn save_batch(&mut self, batch: &OnboardingBatch) -> Result<()> {
        match self.documents.get_mut(&batch.batch_id) {
            Some(document) => {
                document.batch = batch.clone();
                document.touch();
            }
            None => {
                self.documents
                    .insert(batch.batch_id.clone(), BatchDocument::new(batch.clone()));
            }
        }
        Ok(())
    }

    fn load_batch(&self, batch_id: &BatchId) -> Result<OnboardingBatch> {
        self.documents
            .get(batch_id)
            .map(|document| document.batch.clone())
            .ok_or_else(|| PersistenceError::BatchNotFound(batch_id.clone()))
    }

    fn list_batches(&self) -> Result<Vec<BatchListing>> {
        Ok(self.documents.values().map(BatchDocument::listing).collect())
    }

    fn delete_batch(&mut self, batch_id: &BatchId) -> Result<bool> {
        Ok(self.documents.remove(batch_id).is_some())
    }

    fn contains_batch(&self, batch_id: &BatchId) -> Result<bool> {
        Ok(self.documents.contains_key(batch_id))
    }
}
