//! Skill matching and certification readiness for CPASS.
//!
//! - [`SkillMatcher`]: free-text fragment to taxonomy skill
//! - [`aggregate_worker`]: per-worker deduplication and readiness
//! - [`RequirementResolver`]: certification requirement phrases to skill ids
//! - [`OnboardingPipeline`]: mapped upload rows to [`cpass_model::WorkerRecord`]s
//!
//! Nothing in this crate returns an error. Unknown skills, unmatched text
//! and unresolvable requirements degrade to empty results and a log entry.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod matcher;
pub mod pathways;
pub mod pipeline;
pub mod redact;
pub mod requirements;
pub mod similarity;
pub mod split;

pub use aggregate::{
    AggregatedSkills, BatchSummary, DEFAULT_SKILL_BASELINE, aggregate_worker,
    certification_match_percentage, dedupe_matches, readiness_bucket, summarize_workers,
    trust_score,
};
pub use matcher::{
    FragmentMatch, FragmentOutcome, MatcherOptions, SkillMatcher, TextMatches, TierThresholds,
    confidence_tier, proficiency_estimate,
};
pub use pathways::{OccupationPathway, occupation_pathway, occupation_pathways};
pub use pipeline::{
    BatchObserver, NoProgress, OnboardingPipeline, PipelineOptions, RowProgress,
    approve_high_confidence, invitation_code, worker_id_for_row,
};
pub use redact::{REDACTED_VALUE, redact};
pub use requirements::{CertificationReport, RequirementResolver, RequirementStatus, Resolution};
pub use similarity::{PreparedText, normalize_text, similarity};
pub use split::{MIN_FRAGMENT_CHARS, split_fragments};
