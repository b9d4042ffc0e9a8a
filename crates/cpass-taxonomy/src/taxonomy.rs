//! The validated, read-only taxonomy.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use cpass_model::{
    CanonicalTask, Certification, CertificationRequirement, ComplexityLevel, Occupation, Skill,
    SkillId,
};

use crate::error::{Result, TaxonomyError};

/// Unvalidated taxonomy contents, as produced by the loaders.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyParts {
    pub version: String,
    pub skills: Vec<Skill>,
    pub canonical_tasks: Vec<CanonicalTask>,
    pub keywords: Vec<String>,
    pub requirements: Vec<CertificationRequirement>,
    pub certifications: Vec<Certification>,
    pub occupations: Vec<Occupation>,
}

/// A reference to a skill id that the taxonomy does not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// What holds the reference, e.g. `canonical task TASK_019`.
    pub source: String,
    pub skill_id: String,
}

/// Counts reported by [`Taxonomy::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyStats {
    pub version: String,
    pub total_canonical_tasks: usize,
    pub total_skills: usize,
    pub skills_by_domain: BTreeMap<String, usize>,
    pub total_requirements: usize,
    pub total_certifications: usize,
    pub total_occupations: usize,
}

/// Fixed registry of skills, task phrases and certification data.
///
/// Loaded once at start-up and shared by reference. Every accessor returns
/// borrowed data in declaration order.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    version: String,
    skills: Vec<Skill>,
    index: BTreeMap<SkillId, usize>,
    canonical_tasks: Vec<CanonicalTask>,
    keywords: Vec<String>,
    requirements: Vec<CertificationRequirement>,
    certifications: Vec<Certification>,
    occupations: Vec<Occupation>,
}

impl Taxonomy {
    /// Validate `parts` and build the registry.
    ///
    /// Duplicate ids, unknown prerequisites and weights outside [0, 1] are
    /// errors. Task and requirement entries naming unknown skills are kept
    /// and reported by [`Self::dangling_references`].
    pub fn new(parts: TaxonomyParts) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (pos, skill) in parts.skills.iter().enumerate() {
            if index.insert(skill.id.clone(), pos).is_some() {
                return Err(TaxonomyError::DuplicateSkill {
                    id: skill.id.to_string(),
                });
            }
        }
        for skill in &parts.skills {
            if let Some(missing) = skill
                .prerequisites
                .iter()
                .find(|p| !index.contains_key(*p))
            {
                return Err(TaxonomyError::UnknownPrerequisite {
                    skill: skill.id.to_string(),
                    prerequisite: missing.to_string(),
                });
            }
        }
        for task in &parts.canonical_tasks {
            if !(0.0..=1.0).contains(&task.weight) {
                return Err(TaxonomyError::WeightOutOfRange {
                    task: task.id.clone(),
                    weight: task.weight,
                });
            }
        }
        Ok(Self {
            version: parts.version,
            skills: parts.skills,
            index,
            canonical_tasks: parts.canonical_tasks,
            keywords: parts.keywords,
            requirements: parts.requirements,
            certifications: parts.certifications,
            occupations: parts.occupations,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.index.get(id).map(|&pos| &self.skills[pos])
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn canonical_tasks(&self) -> &[CanonicalTask] {
        &self.canonical_tasks
    }

    /// Keyword stems, in declaration order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Requirement registry, in declaration order.
    pub fn requirements(&self) -> &[CertificationRequirement] {
        &self.requirements
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.certifications
    }

    pub fn certification(&self, name: &str) -> Option<&Certification> {
        self.certifications
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn occupations(&self) -> &[Occupation] {
        &self.occupations
    }

    /// Skill ids whose category is one of `categories`, deduplicated, in
    /// the order the categories are given.
    pub fn skill_ids_for_categories<S: AsRef<str>>(&self, categories: &[S]) -> Vec<SkillId> {
        let mut seen = BTreeSet::new();
        let mut ids = Vec::new();
        for category in categories {
            for skill in self
                .skills
                .iter()
                .filter(|s| s.category == category.as_ref())
            {
                if seen.insert(&skill.id) {
                    ids.push(skill.id.clone());
                }
            }
        }
        ids
    }

    /// Complexity of a skill: the declared level, else the level implied by
    /// its longest prerequisite chain. Unknown ids are foundation.
    pub fn complexity_of(&self, id: &str) -> ComplexityLevel {
        match self.skill(id) {
            Some(skill) => skill
                .complexity
                .unwrap_or_else(|| ComplexityLevel::from_depth(self.prerequisite_depth(skill))),
            None => ComplexityLevel::Foundation,
        }
    }

    fn prerequisite_depth(&self, skill: &Skill) -> usize {
        let mut visiting = BTreeSet::new();
        self.depth_inner(skill, &mut visiting)
    }

    fn depth_inner<'a>(&'a self, skill: &'a Skill, visiting: &mut BTreeSet<&'a SkillId>) -> usize {
        visiting.insert(&skill.id);
        let mut depth = 0;
        for prereq in skill
            .prerequisites
            .iter()
            .filter_map(|id| self.skill(id.as_str()))
        {
            // An edge back into the current chain is a cycle and is ignored.
            if visiting.contains(&prereq.id) {
                continue;
            }
            depth = depth.max(1 + self.depth_inner(prereq, visiting));
        }
        visiting.remove(&skill.id);
        depth
    }

    /// Skill ids referenced by canonical tasks or requirement entries that
    /// are not defined in this taxonomy.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for task in &self.canonical_tasks {
            for id in task.skill_ids().filter(|id| !self.contains(id.as_str())) {
                dangling.push(DanglingReference {
                    source: format!("canonical task {}", task.id),
                    skill_id: id.to_string(),
                });
            }
        }
        for requirement in &self.requirements {
            for id in requirement
                .skill_ids
                .iter()
                .filter(|id| !self.contains(id.as_str()))
            {
                dangling.push(DanglingReference {
                    source: format!("requirement {:?}", requirement.phrase),
                    skill_id: id.to_string(),
                });
            }
        }
        dangling
    }

    pub fn stats(&self) -> TaxonomyStats {
        let mut skills_by_domain = BTreeMap::new();
        for skill in &self.skills {
            *skills_by_domain.entry(skill.domain.clone()).or_insert(0) += 1;
        }
        TaxonomyStats {
            version: self.version.clone(),
            total_canonical_tasks: self.canonical_tasks.len(),
            total_skills: self.skills.len(),
            skills_by_domain,
            total_requirements: self.requirements.len(),
            total_certifications: self.certifications.len(),
            total_occupations: self.occupations.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(id: &str, complexity: Option<ComplexityLevel>, prereqs: &[&str]) -> Skill {
        Skill {
            id: SkillId::new(id).unwrap(),
            name: id.to_string(),
            domain: "crop_production".to_string(),
            category: id.to_lowercase(),
            complexity,
            prerequisites: prereqs.iter().map(|p| SkillId::new(*p).unwrap()).collect(),
            synonyms: Vec::new(),
        }
    }

    fn taxonomy(skills: Vec<Skill>) -> Taxonomy {
        Taxonomy::new(TaxonomyParts {
            skills,
            ..TaxonomyParts::default()
        })
        .unwrap()
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Taxonomy::new(TaxonomyParts {
            skills: vec![skill("CP001", None, &[]), skill("cp001", None, &[])],
            ..TaxonomyParts::default()
        })
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateSkill { .. }));
    }

    #[test]
    fn unknown_prerequisite_is_rejected() {
        let err = Taxonomy::new(TaxonomyParts {
            skills: vec![skill("CP002", None, &["CP404"])],
            ..TaxonomyParts::default()
        })
        .unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownPrerequisite { .. }));
    }

    #[test]
    fn derived_complexity_follows_longest_chain() {
        let tax = taxonomy(vec![
            skill("A1", None, &[]),
            skill("A2", None, &["A1"]),
            skill("A3", None, &["A2"]),
            skill("A4", None, &["A3", "A1"]),
            skill("A5", None, &["A4"]),
            skill("B1", Some(ComplexityLevel::Advanced), &["A1"]),
        ]);
        assert_eq!(tax.complexity_of("A1"), ComplexityLevel::Foundation);
        assert_eq!(tax.complexity_of("A2"), ComplexityLevel::Beginner);
        assert_eq!(tax.complexity_of("A4"), ComplexityLevel::Advanced);
        assert_eq!(tax.complexity_of("A5"), ComplexityLevel::Expert);
        assert_eq!(tax.complexity_of("B1"), ComplexityLevel::Advanced);
        assert_eq!(tax.complexity_of("ZZ9"), ComplexityLevel::Foundation);
    }

    #[test]
    fn prerequisite_cycles_terminate() {
        let tax = taxonomy(vec![skill("X1", None, &["X2"]), skill("X2", None, &["X1"])]);
        assert_eq!(tax.complexity_of("X1"), ComplexityLevel::Beginner);
    }

    #[test]
    fn lookups_accept_plain_strings() {
        let tax = taxonomy(vec![skill("CP001", None, &[])]);
        assert!(tax.contains("CP001"));
        assert!(!tax.contains("CP999"));
        assert_eq!(tax.skill("CP001").map(|s| s.name.as_str()), Some("CP001"));
    }
}
