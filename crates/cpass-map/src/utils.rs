//! Utility functions for mapping operations.

use std::collections::BTreeMap;

use cpass_model::ColumnMapping;

/// Header text as the scorer sees it: trimmed and lower-cased.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Merges a stored mapping into freshly detected ones.
///
/// Detected columns keep their order. Where both sides describe the same
/// column, the mapping with the higher confidence wins and ties keep the
/// detected one. Stored columns absent from the upload are dropped.
pub fn merge_mappings(detected: &[ColumnMapping], stored: &[ColumnMapping]) -> Vec<ColumnMapping> {
    let stored: BTreeMap<&str, &ColumnMapping> = stored
        .iter()
        .map(|m| (m.source_column.as_str(), m))
        .collect();
    detected
        .iter()
        .map(|current| match stored.get(current.source_column.as_str()) {
            Some(saved) if saved.confidence > current.confidence => ColumnMapping {
                sample_values: current.sample_values.clone(),
                ..(*saved).clone()
            },
            _ => current.clone(),
        })
        .collect()
}
