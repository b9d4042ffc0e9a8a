//! Occupation pathways: how close a worker's skills are to an occupation.

use std::collections::BTreeSet;

use cpass_model::{Occupation, SkillId};
use cpass_taxonomy::Taxonomy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupationPathway {
    pub occupation_id: String,
    pub title: String,
    pub isco_code: String,
    pub required_skills: Vec<SkillId>,
    pub foundation_skills: Vec<SkillId>,
    pub matched_skills: Vec<SkillId>,
    pub missing_skills: Vec<SkillId>,
    /// Every foundation skill is held.
    pub foundation_complete: bool,
    /// Share of required skills held, rounded, in [0, 100].
    pub match_percentage: u8,
}

pub fn occupation_pathway(
    taxonomy: &Taxonomy,
    occupation: &Occupation,
    skills: &BTreeSet<SkillId>,
) -> OccupationPathway {
    let required_skills = taxonomy.skill_ids_for_categories(&occupation.required_categories);
    let foundation_skills = taxonomy.skill_ids_for_categories(&occupation.foundation_categories);
    let (matched_skills, missing_skills): (Vec<SkillId>, Vec<SkillId>) = required_skills
        .iter()
        .cloned()
        .partition(|id| skills.contains(id));
    let foundation_complete = foundation_skills.iter().all(|id| skills.contains(id));
    let match_percentage = if required_skills.is_empty() {
        0
    } else {
        let total = required_skills.len();
        ((matched_skills.len() * 200 + total) / (2 * total)).min(100) as u8
    };
    OccupationPathway {
        occupation_id: occupation.id.clone(),
        title: occupation.title.clone(),
        isco_code: occupation.isco_code.clone(),
        required_skills,
        foundation_skills,
        matched_skills,
        missing_skills,
        foundation_complete,
        match_percentage,
    }
}

/// Pathways for every occupation, closest first. Ties keep catalog order.
pub fn occupation_pathways(
    taxonomy: &Taxonomy,
    skills: &BTreeSet<SkillId>,
) -> Vec<OccupationPathway> {
    let mut pathways: Vec<OccupationPathway> = taxonomy
        .occupations()
        .iter()
        .map(|occupation| occupation_pathway(taxonomy, occupation, skills))
        .collect();
    pathways.sort_by(|a, b| {
        b.foundation_complete
            .cmp(&a.foundation_complete)
            .then(b.match_percentage.cmp(&a.match_percentage))
    });
    pathways
}
