//! Mapping review state.
//!
//! Holds the engine's suggestions for one batch while a user confirms or
//! overrides them, and produces the final [`MappingConfig`].

use std::collections::BTreeMap;

use cpass_model::{BatchId, ColumnMapping, TargetField};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{ConfidenceLevel, ConfidenceThresholds, MappingResult};
use crate::error::{MappingError, Result};

/// Confidence given to a mapping the user confirmed by hand.
pub const MANUAL_CONFIDENCE: f32 = 1.0;

/// Final column mappings of one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub batch_id: BatchId,
    pub mappings: Vec<ColumnMapping>,
}

impl MappingConfig {
    /// Columns mapped to `ignore`.
    pub fn ignored_columns(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter(|m| !m.is_active())
            .map(|m| m.source_column.as_str())
            .collect()
    }
}

/// Review state of one batch's column mappings.
#[derive(Debug, Clone)]
pub struct MappingReview {
    pub batch_id: BatchId,
    mappings: Vec<ColumnMapping>,
}

impl MappingReview {
    pub fn new(batch_id: BatchId, result: MappingResult) -> Self {
        Self {
            batch_id,
            mappings: result.mappings,
        }
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn mapping_for(&self, column: &str) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.source_column == column)
    }

    /// Map `column` to `field` by hand. The mapping is marked overridden and
    /// its confidence set to [`MANUAL_CONFIDENCE`].
    pub fn accept_manual(&mut self, column: &str, field: TargetField) -> Result<()> {
        let mapping = self
            .mappings
            .iter_mut()
            .find(|m| m.source_column == column)
            .ok_or_else(|| MappingError::ColumnNotFound(column.to_string()))?;
        mapping.target_field = field;
        mapping.confidence = MANUAL_CONFIDENCE;
        mapping.overridden = true;
        Ok(())
    }

    /// Exclude `column` from downstream processing.
    pub fn ignore_column(&mut self, column: &str) -> Result<()> {
        self.accept_manual(column, TargetField::Ignore)
    }

    /// Apply `COLUMN=FIELD` overrides as given on the command line.
    ///
    /// The split is on the last `=`, so column names may contain `=`.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<()> {
        for raw in overrides {
            let raw = raw.as_ref();
            let (column, field) = raw
                .rsplit_once('=')
                .map(|(c, f)| (c.trim(), f.trim()))
                .filter(|(c, f)| !c.is_empty() && !f.is_empty())
                .ok_or_else(|| MappingError::InvalidOverride(raw.to_string()))?;
            let field: TargetField = field.parse()?;
            self.accept_manual(column, field)?;
            info!(column, field = %field, "column override applied");
        }
        Ok(())
    }

    pub fn summary(&self) -> MappingSummary {
        let thresholds = ConfidenceThresholds::default();
        let mut by_level: BTreeMap<ConfidenceLevel, usize> = BTreeMap::new();
        for mapping in &self.mappings {
            *by_level
                .entry(thresholds.categorize(mapping.confidence))
                .or_insert(0) += 1;
        }
        MappingSummary {
            total_columns: self.mappings.len(),
            mapped: self.mappings.iter().filter(|m| m.is_active()).count(),
            ignored: self.mappings.iter().filter(|m| !m.is_active()).count(),
            overridden: self.mappings.iter().filter(|m| m.overridden).count(),
            high: by_level.get(&ConfidenceLevel::High).copied().unwrap_or(0),
            medium: by_level.get(&ConfidenceLevel::Medium).copied().unwrap_or(0),
            low: by_level.get(&ConfidenceLevel::Low).copied().unwrap_or(0),
        }
    }

    /// Convert to final MappingConfig.
    pub fn to_config(&self) -> MappingConfig {
        MappingConfig {
            batch_id: self.batch_id.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub total_columns: usize,
    /// Columns mapped to a field other than `ignore`.
    pub mapped: usize,
    pub ignored: usize,
    pub overridden: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}
