//! Certification requirement resolution.
//!
//! A requirement phrase resolves against the ordered registry in three
//! passes: exact text, case-insensitive text, then containment in either
//! direction. The first registry entry that satisfies a pass wins, so the
//! registry's declared order decides ambiguous phrases.

use std::collections::BTreeSet;

use cpass_model::{Certification, CertificationRequirement, MatchMethod, SkillId};
use cpass_taxonomy::Taxonomy;
use serde::Serialize;
use tracing::warn;

/// Skill ids a requirement phrase resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub phrase: String,
    /// Registry entry that matched, if any.
    pub registry_phrase: Option<String>,
    pub skill_ids: Vec<SkillId>,
    pub method: MatchMethod,
}

impl Resolution {
    /// Met when the worker holds any of the resolved skills.
    pub fn is_met_by(&self, skills: &BTreeSet<SkillId>) -> bool {
        self.skill_ids.iter().any(|id| skills.contains(id))
    }
}

/// Resolves requirement phrases against an ordered registry.
#[derive(Debug, Clone, Copy)]
pub struct RequirementResolver<'t> {
    registry: &'t [CertificationRequirement],
}

impl<'t> RequirementResolver<'t> {
    pub fn new(registry: &'t [CertificationRequirement]) -> Self {
        Self { registry }
    }

    pub fn from_taxonomy(taxonomy: &'t Taxonomy) -> Self {
        Self::new(taxonomy.requirements())
    }

    fn found(phrase: &str, entry: &CertificationRequirement, method: MatchMethod) -> Resolution {
        Resolution {
            phrase: phrase.to_string(),
            registry_phrase: Some(entry.phrase.clone()),
            skill_ids: entry.skill_ids.clone(),
            method,
        }
    }

    /// Resolve one phrase. Unresolvable phrases yield an empty skill set
    /// and a warning; they are never an error.
    pub fn resolve(&self, requirement: &str) -> Resolution {
        let trimmed = requirement.trim();
        if !trimmed.is_empty() {
            if let Some(entry) = self.registry.iter().find(|e| e.phrase == trimmed) {
                return Self::found(requirement, entry, MatchMethod::Exact);
            }
            let lowered = trimmed.to_lowercase();
            if let Some(entry) = self
                .registry
                .iter()
                .find(|e| e.phrase.to_lowercase() == lowered)
            {
                return Self::found(requirement, entry, MatchMethod::CaseInsensitive);
            }
            if let Some(entry) = self.registry.iter().find(|e| {
                let key = e.phrase.to_lowercase();
                lowered.contains(&key) || key.contains(&lowered)
            }) {
                return Self::found(requirement, entry, MatchMethod::Fuzzy);
            }
        }
        warn!(requirement, "no skill mapping found for certification requirement");
        Resolution {
            phrase: requirement.to_string(),
            registry_phrase: None,
            skill_ids: Vec::new(),
            method: MatchMethod::Unresolved,
        }
    }

    pub fn is_met(&self, requirement: &str, skills: &BTreeSet<SkillId>) -> bool {
        self.resolve(requirement).is_met_by(skills)
    }

    /// Check every requirement of `certification` against a worker's skills.
    pub fn report(
        &self,
        certification: &Certification,
        skills: &BTreeSet<SkillId>,
    ) -> CertificationReport {
        let requirements: Vec<RequirementStatus> = certification
            .requirements
            .iter()
            .map(|phrase| {
                let resolution = self.resolve(phrase);
                let met = resolution.is_met_by(skills);
                RequirementStatus { resolution, met }
            })
            .collect();
        let matched = requirements.iter().filter(|r| r.met).count();
        let total = requirements.len();
        CertificationReport {
            certification: certification.name.clone(),
            matched,
            total,
            percentage: rounded_percent(matched, total),
            requirements,
        }
    }

    /// Reports for every certification, best coverage first. Equal
    /// coverage keeps catalog order.
    pub fn reports(
        &self,
        certifications: &[Certification],
        skills: &BTreeSet<SkillId>,
    ) -> Vec<CertificationReport> {
        let mut reports: Vec<CertificationReport> = certifications
            .iter()
            .map(|c| self.report(c, skills))
            .collect();
        reports.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        reports
    }
}

fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (2 * whole)).min(100) as u8
}

/// One requirement of a certification and whether it is met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementStatus {
    pub resolution: Resolution,
    pub met: bool,
}

/// How much of a certification a worker already covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificationReport {
    pub certification: String,
    pub matched: usize,
    pub total: usize,
    /// `round(matched / total * 100)`.
    pub percentage: u8,
    pub requirements: Vec<RequirementStatus>,
}

impl CertificationReport {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    pub fn matched_requirements(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter(|r| r.met)
            .map(|r| r.resolution.phrase.as_str())
            .collect()
    }

    pub fn missing_requirements(&self) -> Vec<&str> {
        self.requirements
            .iter()
            .filter(|r| !r.met)
            .map(|r| r.resolution.phrase.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(phrase: &str, ids: &[&str]) -> CertificationRequirement {
        CertificationRequirement {
            phrase: phrase.to_string(),
            skill_ids: ids.iter().map(|id| SkillId::new(*id).unwrap()).collect(),
        }
    }

    fn registry() -> Vec<CertificationRequirement> {
        vec![
            entry("Irrigation management", &["CP001"]),
            entry("irrigation", &["CP001", "MC003"]),
            entry("pest management", &["CP005", "CP004"]),
            entry("Integrated Pest Management", &["CP005"]),
        ]
    }

    #[test]
    fn passes_run_in_order() {
        let registry = registry();
        let resolver = RequirementResolver::new(&registry);

        let exact = resolver.resolve("irrigation");
        assert_eq!(exact.method, MatchMethod::Exact);
        assert_eq!(exact.skill_ids.len(), 2);

        let case = resolver.resolve(" Pest Management ");
        assert_eq!(case.method, MatchMethod::CaseInsensitive);
        assert_eq!(case.registry_phrase.as_deref(), Some("pest management"));

        // Contains "irrigation management", the first entry it contains.
        let fuzzy = resolver.resolve("Drip irrigation management skills");
        assert_eq!(fuzzy.method, MatchMethod::Fuzzy);
        assert_eq!(fuzzy.registry_phrase.as_deref(), Some("Irrigation management"));
    }

    #[test]
    fn unresolved_requirement_is_never_met() {
        let registry = registry();
        let resolver = RequirementResolver::new(&registry);
        let skills: BTreeSet<SkillId> = [SkillId::new("CP001").unwrap()].into();

        let missing = resolver.resolve("Beekeeping");
        assert_eq!(missing.method, MatchMethod::Unresolved);
        assert!(missing.skill_ids.is_empty());
        assert!(!resolver.is_met("Beekeeping", &skills));
        assert_eq!(resolver.resolve("   ").method, MatchMethod::Unresolved);
    }

    #[test]
    fn empty_certification_reports_zero() {
        let registry = registry();
        let resolver = RequirementResolver::new(&registry);
        let cert = Certification {
            name: "Empty".to_string(),
            requirements: vec![],
        };
        let report = resolver.report(&cert, &BTreeSet::new());
        assert_eq!((report.matched, report.total, report.percentage), (0, 0, 0));
    }
}
