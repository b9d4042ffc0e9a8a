//! Column mapping engine.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use cpass_ingest::CsvTable;
use cpass_model::{ColumnMapping, TargetField};
use tracing::debug;

use crate::patterns::field_keywords;
use crate::utils::normalize_header;

/// Confidence assigned to a column no keyword matched. A review marker,
/// not a probability.
pub const NO_MATCH_CONFIDENCE: f32 = 0.3;
/// Ceiling for keyword-derived confidence.
pub const MAX_KEYWORD_CONFIDENCE: f32 = 0.95;
/// Multiplier on the keyword-to-header length ratio.
const LENGTH_RATIO_BOOST: f32 = 1.5;
/// Rows sampled per column for display.
pub const SAMPLE_ROWS: usize = 3;

/// Display band of a column mapping's confidence.
///
/// - `High`: keyword covers most of the header
/// - `Medium`: plausible, worth a glance
/// - `Low`: weak or unmatched, needs manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Boundaries between column confidence bands.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for the high band (default: 0.80).
    pub high: f32,
    /// Minimum confidence for the medium band (default: 0.50).
    pub medium: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.80,
            medium: 0.50,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> ConfidenceLevel {
        if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Result of mapping one upload: one entry per header, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingResult {
    pub mappings: Vec<ColumnMapping>,
}

impl MappingResult {
    /// Returns the count of mappings in each band.
    ///
    /// Uses default thresholds. For custom thresholds, use [`Self::count_by_level_with`].
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        self.count_by_level_with(&ConfidenceThresholds::default())
    }

    #[must_use]
    pub fn count_by_level_with(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for mapping in &self.mappings {
            *counts
                .entry(thresholds.categorize(mapping.confidence))
                .or_insert(0) += 1;
        }
        counts
    }

    /// Mappings at or above `min_level`, using default thresholds.
    #[must_use]
    pub fn filter_by_level(&self, min_level: ConfidenceLevel) -> Vec<&ColumnMapping> {
        let thresholds = ConfidenceThresholds::default();
        self.mappings
            .iter()
            .filter(|m| thresholds.categorize(m.confidence) >= min_level)
            .collect()
    }

    /// Mappings grouped by band, using default thresholds.
    #[must_use]
    pub fn group_by_level(&self) -> BTreeMap<ConfidenceLevel, Vec<&ColumnMapping>> {
        let thresholds = ConfidenceThresholds::default();
        let mut groups: BTreeMap<ConfidenceLevel, Vec<&ColumnMapping>> = BTreeMap::new();
        for mapping in &self.mappings {
            groups
                .entry(thresholds.categorize(mapping.confidence))
                .or_default()
                .push(mapping);
        }
        groups
    }

    /// Mappings that feed downstream processing (everything but `ignore`).
    pub fn active_mappings(&self) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings.iter().filter(|m| m.is_active())
    }

    pub fn ignored_columns(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter(|m| !m.is_active())
            .map(|m| m.source_column.as_str())
            .collect()
    }

    /// First column mapped to `field`.
    pub fn column_for(&self, field: TargetField) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.target_field == field)
            .map(|m| m.source_column.as_str())
    }

    /// Returns the mean confidence score among all mappings, if any.
    #[must_use]
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.mappings.is_empty() {
            return None;
        }
        let sum: f32 = self.mappings.iter().map(|m| m.confidence).sum();
        Some(sum / self.mappings.len() as f32)
    }

    /// Returns the minimum confidence score among all mappings, if any.
    #[must_use]
    pub fn min_confidence(&self) -> Option<f32> {
        self.mappings
            .iter()
            .map(|m| m.confidence)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }
}

/// Keyword scorer that assigns each upload column a [`TargetField`].
///
/// For every field the best keyword found inside the header scores
/// `keyword_len / header_len * 1.5`, capped at 0.95. The highest-scoring
/// field wins; on ties the field listed first in [`TargetField::ALL`]
/// wins. Headers no keyword matches map to [`TargetField::Ignore`] at
/// [`NO_MATCH_CONFIDENCE`].
///
/// # Example
///
/// ```ignore
/// use cpass_map::MappingEngine;
///
/// let (field, confidence) = MappingEngine::new().score_header("Farmer Full Name");
/// assert_eq!(field, TargetField::FullName);
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    sample_rows: usize,
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingEngine {
    pub fn new() -> Self {
        Self {
            sample_rows: SAMPLE_ROWS,
        }
    }

    /// Number of leading rows sampled per column.
    #[must_use]
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    /// Score a single header. Pure and deterministic.
    pub fn score_header(&self, header: &str) -> (TargetField, f32) {
        let normalized = normalize_header(header);
        let header_len = normalized.chars().count();
        let mut best: Option<(TargetField, f32)> = None;
        if header_len == 0 {
            return (TargetField::Ignore, NO_MATCH_CONFIDENCE);
        }
        for field in TargetField::ALL {
            let score = field_keywords(field)
                .iter()
                .filter(|keyword| normalized.contains(*keyword))
                .map(|keyword| {
                    let ratio = keyword.chars().count() as f32 / header_len as f32;
                    (ratio * LENGTH_RATIO_BOOST).min(MAX_KEYWORD_CONFIDENCE)
                })
                .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.max(s))));
            if let Some(score) = score
                && best.is_none_or(|(_, current)| score > current)
            {
                best = Some((field, score));
            }
        }
        best.unwrap_or((TargetField::Ignore, NO_MATCH_CONFIDENCE))
    }

    /// Map headers given their sample values (parallel slices).
    pub fn suggest_headers(&self, headers: &[String], samples: &[Vec<String>]) -> MappingResult {
        let mappings = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let (target_field, confidence) = self.score_header(header);
                debug!(column = %header, field = %target_field, confidence, "scored column");
                ColumnMapping {
                    source_column: header.clone(),
                    target_field,
                    confidence,
                    sample_values: samples.get(idx).cloned().unwrap_or_default(),
                    overridden: false,
                }
            })
            .collect();
        MappingResult { mappings }
    }

    /// Map every column of an upload.
    pub fn suggest(&self, table: &CsvTable) -> MappingResult {
        let samples: Vec<Vec<String>> = (0..table.headers.len())
            .map(|idx| table.sample_values(idx, self.sample_rows))
            .collect();
        self.suggest_headers(&table.headers, &samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farmer_full_name_maps_to_full_name() {
        let (field, confidence) = MappingEngine::new().score_header("Farmer Full Name");
        assert_eq!(field, TargetField::FullName);
        // "farmer" covers 6 of 16 characters.
        assert!((confidence - 0.5625).abs() < 1e-6);
    }

    #[test]
    fn short_exact_header_is_capped() {
        let (field, confidence) = MappingEngine::new().score_header("  Phone ");
        assert_eq!(field, TargetField::Phone);
        assert!((confidence - MAX_KEYWORD_CONFIDENCE).abs() < 1e-6);
    }

    #[test]
    fn unknown_header_is_ignored_at_floor() {
        let (field, confidence) = MappingEngine::new().score_header("Remarks");
        assert_eq!(field, TargetField::Ignore);
        assert!((confidence - NO_MATCH_CONFIDENCE).abs() < 1e-6);
        assert_eq!(MappingEngine::new().score_header("").0, TargetField::Ignore);
    }

    #[test]
    fn ties_go_to_earlier_field() {
        // "tel" (phone) and "age" (age) both cover 3 of 7 characters.
        let (field, _) = MappingEngine::new().score_header("tel age");
        assert_eq!(field, TargetField::Phone);
    }

    #[test]
    fn bands_follow_default_thresholds() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.categorize(0.95), ConfidenceLevel::High);
        assert_eq!(thresholds.categorize(0.8), ConfidenceLevel::High);
        assert_eq!(thresholds.categorize(0.5625), ConfidenceLevel::Medium);
        assert_eq!(thresholds.categorize(0.3), ConfidenceLevel::Low);
    }
}
