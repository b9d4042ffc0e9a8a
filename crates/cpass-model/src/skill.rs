use serde::{Deserialize, Serialize};

use crate::enums::ComplexityLevel;
use crate::ids::SkillId;

/// A canonical skill in the taxonomy. Reference data: built when the
/// taxonomy is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Broad domain, e.g. `crop_production`.
    pub domain: String,
    /// Category key used by occupation profiles, e.g. `watering_irrigation`.
    pub category: String,
    /// Declared complexity. When absent it is derived from prerequisites.
    pub complexity: Option<ComplexityLevel>,
    pub prerequisites: Vec<SkillId>,
    /// Alternative phrases a worker might use for this skill.
    pub synonyms: Vec<String>,
}

/// A reference task phrase that the matcher compares free text against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTask {
    pub id: String,
    pub phrase: String,
    pub primary_skill: SkillId,
    pub secondary_skills: Vec<SkillId>,
    /// Confidence of the primary skill when the phrase matches exactly.
    pub weight: f32,
}

impl CanonicalTask {
    /// Every skill id this task refers to, primary first.
    pub fn skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        std::iter::once(&self.primary_skill).chain(self.secondary_skills.iter())
    }
}
