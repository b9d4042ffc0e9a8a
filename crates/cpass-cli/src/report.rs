//! Serializable command reports.
//!
//! Each command builds one of these from library results, then prints it
//! either as tables or as JSON with `--json`.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Result, bail};
use cpass_map::{MappingSummary, NO_MATCH_CONFIDENCE};
use cpass_model::{
    BatchId, ColumnMapping, ComplexityLevel, ConfidenceTier, DataTier, OnboardingBatch,
    ProficiencyEstimate, ReadinessBucket, SkillId, WorkerProficiency,
};
use cpass_skills::{
    BatchSummary, CertificationReport, FragmentOutcome, OccupationPathway, RequirementResolver,
    SkillMatcher, occupation_pathways, split_fragments, summarize_workers, trust_score,
};
use cpass_taxonomy::Taxonomy;
use serde::Serialize;

/// Batch id from an upload's file stem: characters outside `[A-Za-z0-9_-]`
/// become `-`, and an empty result falls back to `BATCH`.
pub fn derive_batch_id(path: &Path) -> Result<BatchId> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('-');
    let id = if cleaned.is_empty() { "BATCH" } else { cleaned };
    Ok(BatchId::new(id)?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLine {
    pub column: String,
    pub field: String,
    pub confidence: f32,
    pub overridden: bool,
    pub samples: Vec<String>,
}

impl From<&ColumnMapping> for ColumnLine {
    fn from(mapping: &ColumnMapping) -> Self {
        Self {
            column: mapping.source_column.clone(),
            field: mapping.target_field.to_string(),
            confidence: mapping.confidence,
            overridden: mapping.overridden,
            samples: mapping.sample_values.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnsReport {
    pub data_tier: Option<DataTier>,
    pub columns: Vec<ColumnLine>,
    pub summary: MappingSummary,
}

impl ColumnsReport {
    pub fn new(
        data_tier: Option<DataTier>,
        mappings: &[ColumnMapping],
        summary: MappingSummary,
    ) -> Self {
        Self {
            data_tier,
            columns: mappings.iter().map(ColumnLine::from).collect(),
            summary,
        }
    }

    /// Columns nothing matched and nobody overrode.
    pub fn unrecognized(&self) -> impl Iterator<Item = &ColumnLine> {
        self.columns
            .iter()
            .filter(|c| !c.overridden && c.confidence <= NO_MATCH_CONFIDENCE)
    }
}

/// Outcome of one fragment of free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentLine {
    pub fragment: String,
    /// `matched`, `rejected` or `no_match`.
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<SkillId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ConfidenceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<ProficiencyEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_task: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_skills: Vec<SkillId>,
}

impl FragmentLine {
    fn bare(fragment: String, outcome: &'static str, skill_id: Option<SkillId>) -> Self {
        Self {
            fragment,
            outcome,
            skill_id,
            skill_name: None,
            confidence: None,
            tier: None,
            proficiency: None,
            canonical_task: None,
            secondary_skills: Vec::new(),
        }
    }
}

/// Match every fragment of `text`, keeping fragment order.
pub fn match_report(matcher: &SkillMatcher<'_>, text: &str) -> Vec<FragmentLine> {
    split_fragments(text)
        .into_iter()
        .map(|fragment| match matcher.match_fragment(fragment) {
            FragmentOutcome::Matched(found) => FragmentLine {
                fragment: found.fragment,
                outcome: "matched",
                skill_id: Some(found.skill_id),
                skill_name: Some(found.skill_name),
                confidence: Some(found.confidence),
                tier: Some(found.tier),
                proficiency: Some(found.proficiency),
                canonical_task: found.canonical_task,
                secondary_skills: found.secondary_skills,
            },
            FragmentOutcome::Rejected { fragment, skill_id } => {
                FragmentLine::bare(fragment, "rejected", Some(skill_id))
            }
            FragmentOutcome::NoMatch => FragmentLine::bare(fragment.to_string(), "no_match", None),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerLine {
    pub worker_id: String,
    pub name: String,
    pub invitation_code: String,
    pub skills: Vec<SkillId>,
    pub certification_match_percentage: u8,
    pub readiness: ReadinessBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardReport {
    pub batch_id: BatchId,
    pub data_tier: Option<DataTier>,
    pub total_rows: usize,
    pub processed_rows: usize,
    pub stopped_early: bool,
    pub rejected_matches: usize,
    pub mapping: MappingSummary,
    pub summary: BatchSummary,
    pub workers: Vec<WorkerLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
}

impl OnboardReport {
    pub fn new(batch: &OnboardingBatch, mapping: MappingSummary) -> Self {
        Self {
            batch_id: batch.batch_id.clone(),
            data_tier: batch.data_tier,
            total_rows: batch.total_rows,
            processed_rows: batch.workers.len(),
            stopped_early: batch.stopped_early,
            rejected_matches: batch.rejected_matches,
            mapping,
            summary: summarize_workers(&batch.workers),
            workers: batch
                .workers
                .iter()
                .map(|w| WorkerLine {
                    worker_id: w.worker_id.clone(),
                    name: w.display_name().to_string(),
                    invitation_code: w.invitation_code.clone(),
                    skills: w.skill_ids().cloned().collect(),
                    certification_match_percentage: w.certification_match_percentage,
                    readiness: w.readiness,
                })
                .collect(),
            mapping_path: None,
            store_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub skill_id: SkillId,
    pub name: String,
    pub complexity: ComplexityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<WorkerProficiency>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertifyReport {
    pub skills: Vec<SkillLine>,
    /// Requested ids the taxonomy does not define.
    pub unknown_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<u8>,
    pub certifications: Vec<CertificationReport>,
    pub pathways: Vec<OccupationPathway>,
}

/// Coverage report for a worker holding `skill_ids`, optionally with a
/// self rating per skill. The trust score only counts the first rating of
/// each known skill.
pub fn certify_report(
    taxonomy: &Taxonomy,
    skill_ids: &[String],
    ratings: &[u8],
) -> Result<CertifyReport> {
    if !ratings.is_empty() && ratings.len() != skill_ids.len() {
        bail!(
            "got {} ratings for {} skills; give one rating per skill",
            ratings.len(),
            skill_ids.len()
        );
    }
    let mut held = BTreeSet::new();
    let mut skills = Vec::new();
    let mut unknown_skills = Vec::new();
    let mut counted_ratings = Vec::new();
    for (idx, raw) in skill_ids.iter().enumerate() {
        let raw = raw.trim();
        let rating = ratings.get(idx).copied();
        match taxonomy.skill(&raw.to_uppercase()) {
            Some(skill) => {
                if held.insert(skill.id.clone()) {
                    counted_ratings.extend(rating);
                    skills.push(SkillLine {
                        skill_id: skill.id.clone(),
                        name: skill.name.clone(),
                        complexity: taxonomy.complexity_of(skill.id.as_str()),
                        rating,
                        proficiency: rating.map(WorkerProficiency::from_rating),
                    });
                }
            }
            None => unknown_skills.push(raw.to_string()),
        }
    }
    let resolver = RequirementResolver::from_taxonomy(taxonomy);
    Ok(CertifyReport {
        skills,
        unknown_skills,
        trust_score: (!counted_ratings.is_empty()).then(|| trust_score(&counted_ratings)),
        certifications: resolver.reports(taxonomy.certifications(), &held),
        pathways: occupation_pathways(taxonomy, &held),
    })
}
