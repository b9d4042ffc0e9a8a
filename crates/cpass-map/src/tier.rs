//! Upload richness detection.

use cpass_model::DataTier;

use crate::error::{MappingError, Result};
use crate::utils::normalize_header;

fn any_contains(headers: &[String], needles: &[&str]) -> bool {
    headers
        .iter()
        .any(|h| needles.iter().any(|needle| h.contains(needle)))
}

/// Classify an upload by the columns it carries.
///
/// Every upload needs a name column and a work/task column. `medium`
/// additionally has years of experience and a work type; `detailed` adds
/// farm size, frequency and supervision on top of that.
pub fn detect_data_tier<S: AsRef<str>>(headers: &[S]) -> Result<DataTier> {
    let headers: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect();

    if !any_contains(&headers, &["name", "fullname", "full_name"]) {
        return Err(MappingError::NoNameColumn);
    }
    if !any_contains(&headers, &["work", "task", "skill", "experience"]) {
        return Err(MappingError::NoWorkColumn);
    }

    let medium = any_contains(&headers, &["years", "experience_years"])
        && any_contains(&headers, &["work_type", "type"]);
    if !medium {
        return Ok(DataTier::Basic);
    }
    let detailed = any_contains(&headers, &["farm_size", "scale"])
        && any_contains(&headers, &["frequency"])
        && any_contains(&headers, &["supervision"]);
    Ok(if detailed {
        DataTier::Detailed
    } else {
        DataTier::Medium
    })
}
