use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceTier, ProficiencyEstimate, ReviewStatus};
use crate::ids::SkillId;
use crate::mapping::TargetField;

/// One candidate phrase of a worker's free text matched to a taxonomy skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub worker_id: String,
    /// Column role the phrase was taken from.
    pub source_field: TargetField,
    /// The phrase as it appeared in the upload, trimmed.
    pub raw_text: String,
    pub skill_id: SkillId,
    pub skill_name: String,
    /// In [0, 1].
    pub confidence: f32,
    pub tier: ConfidenceTier,
    pub proficiency: ProficiencyEstimate,
    /// Canonical task phrase the text matched, if it matched one.
    pub canonical_task: Option<String>,
    #[serde(default)]
    pub secondary_skills: Vec<SkillId>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl SkillMatch {
    pub fn needs_review(&self) -> bool {
        self.status == ReviewStatus::Pending
    }
}
