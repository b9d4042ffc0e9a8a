//! Task-to-skill matcher.
//!
//! Each fragment of a worker's free text is compared with every matching
//! target: canonical task phrases first, then skill synonyms. The single
//! best target decides the skill. Nothing here is statistical; the same
//! taxonomy and text always give the same answer.

use cpass_model::{
    ConfidenceTier, ProficiencyEstimate, ReviewStatus, SkillId, SkillMatch, TargetField,
};
use cpass_taxonomy::Taxonomy;
use tracing::{debug, warn};

use crate::redact::redact;
use crate::similarity::PreparedText;
use crate::split::split_fragments;

/// Confidence bands of a skill match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    /// Minimum confidence for the high tier (default: 0.85).
    pub high: f32,
    /// Minimum confidence for the medium tier (default: 0.50).
    pub medium: f32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: 0.85,
            medium: 0.50,
        }
    }
}

/// Tier of a match confidence.
pub fn confidence_tier(confidence: f32, thresholds: &TierThresholds) -> ConfidenceTier {
    if confidence >= thresholds.high {
        ConfidenceTier::High
    } else if confidence >= thresholds.medium {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}

/// Proficiency implied by a match confidence: Proficient from 0.8,
/// Competent from 0.5, Beginner below.
pub fn proficiency_estimate(confidence: f32) -> ProficiencyEstimate {
    if confidence >= 0.8 {
        ProficiencyEstimate::Proficient
    } else if confidence >= 0.5 {
        ProficiencyEstimate::Competent
    } else {
        ProficiencyEstimate::Beginner
    }
}

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherOptions {
    /// Best similarity below this yields no match (default: 0.40).
    pub min_similarity: f32,
    /// Weight applied to synonym targets (default: 0.85).
    pub synonym_weight: f32,
    /// Upper bound on match confidence (default: 0.99).
    pub confidence_cap: f32,
    pub tiers: TierThresholds,
    /// Log worker text verbatim instead of redacting it.
    pub log_data: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            min_similarity: 0.40,
            synonym_weight: 0.85,
            confidence_cap: 0.99,
            tiers: TierThresholds::default(),
            log_data: false,
        }
    }
}

#[derive(Debug, Clone)]
struct MatchTarget {
    skill_id: SkillId,
    secondary: Vec<SkillId>,
    weight: f32,
    canonical_task: Option<String>,
    text: PreparedText,
}

/// A fragment matched to a taxonomy skill.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentMatch {
    pub fragment: String,
    pub skill_id: SkillId,
    pub skill_name: String,
    pub similarity: f32,
    pub confidence: f32,
    pub tier: ConfidenceTier,
    pub proficiency: ProficiencyEstimate,
    pub canonical_task: Option<String>,
    /// Secondary skills of the matched canonical task that the taxonomy defines.
    pub secondary_skills: Vec<SkillId>,
}

impl FragmentMatch {
    /// Attach the match to a worker. High-tier matches are approved
    /// straight away; everything else waits for review.
    pub fn into_skill_match(self, worker_id: &str, source_field: TargetField) -> SkillMatch {
        let status = if self.tier == ConfidenceTier::High {
            ReviewStatus::Approved
        } else {
            ReviewStatus::Pending
        };
        SkillMatch {
            worker_id: worker_id.to_string(),
            source_field,
            raw_text: self.fragment,
            skill_id: self.skill_id,
            skill_name: self.skill_name,
            confidence: self.confidence,
            tier: self.tier,
            proficiency: self.proficiency,
            canonical_task: self.canonical_task,
            secondary_skills: self.secondary_skills,
            status,
        }
    }
}

/// What became of one fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentOutcome {
    Matched(FragmentMatch),
    /// The best target names a skill the taxonomy does not define.
    Rejected { fragment: String, skill_id: SkillId },
    NoMatch,
}

/// All outcomes for one free-text cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMatches {
    pub matches: Vec<FragmentMatch>,
    pub rejected: usize,
    pub unmatched: Vec<String>,
}

/// Rule-based matcher over a loaded taxonomy.
#[derive(Debug, Clone)]
pub struct SkillMatcher<'t> {
    taxonomy: &'t Taxonomy,
    targets: Vec<MatchTarget>,
    options: MatcherOptions,
}

impl<'t> SkillMatcher<'t> {
    pub fn new(taxonomy: &'t Taxonomy, options: MatcherOptions) -> Self {
        let stems = taxonomy.keywords();
        let mut targets = Vec::new();
        for task in taxonomy.canonical_tasks() {
            targets.push(MatchTarget {
                skill_id: task.primary_skill.clone(),
                secondary: task.secondary_skills.clone(),
                weight: task.weight,
                canonical_task: Some(task.phrase.clone()),
                text: PreparedText::new(&task.phrase, stems),
            });
        }
        for skill in taxonomy.skills() {
            for synonym in &skill.synonyms {
                targets.push(MatchTarget {
                    skill_id: skill.id.clone(),
                    secondary: Vec::new(),
                    weight: options.synonym_weight,
                    canonical_task: None,
                    text: PreparedText::new(synonym, stems),
                });
            }
        }
        debug!(targets = targets.len(), "prepared matching targets");
        Self {
            taxonomy,
            targets,
            options,
        }
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Highest-similarity target for `fragment`; the earliest wins ties.
    fn best_target(&self, phrase: &PreparedText) -> Option<(&MatchTarget, f32)> {
        let mut best: Option<(&MatchTarget, f32)> = None;
        for target in &self.targets {
            let score = phrase.similarity(&target.text);
            if best.is_none_or(|(_, current)| score > current) {
                best = Some((target, score));
            }
        }
        best
    }

    /// Match a single phrase.
    pub fn match_fragment(&self, fragment: &str) -> FragmentOutcome {
        let fragment = fragment.trim();
        let phrase = PreparedText::new(fragment, self.taxonomy.keywords());
        if phrase.is_empty() {
            return FragmentOutcome::NoMatch;
        }
        let Some((target, similarity)) = self.best_target(&phrase) else {
            return FragmentOutcome::NoMatch;
        };
        if similarity < self.options.min_similarity {
            debug!(
                fragment = redact(fragment, self.options.log_data),
                similarity, "no taxonomy match"
            );
            return FragmentOutcome::NoMatch;
        }
        let Some(skill) = self.taxonomy.skill(target.skill_id.as_str()) else {
            warn!(
                skill_id = %target.skill_id,
                fragment = redact(fragment, self.options.log_data),
                "rejected match for skill missing from taxonomy"
            );
            return FragmentOutcome::Rejected {
                fragment: fragment.to_string(),
                skill_id: target.skill_id.clone(),
            };
        };

        let confidence = (similarity * target.weight).min(self.options.confidence_cap);
        let secondary_skills = target
            .secondary
            .iter()
            .filter(|id| self.taxonomy.contains(id.as_str()))
            .cloned()
            .collect();
        debug!(
            fragment = redact(fragment, self.options.log_data),
            skill_id = %skill.id,
            similarity,
            confidence,
            "matched fragment"
        );
        FragmentOutcome::Matched(FragmentMatch {
            fragment: fragment.to_string(),
            skill_id: skill.id.clone(),
            skill_name: skill.name.clone(),
            similarity,
            confidence,
            tier: confidence_tier(confidence, &self.options.tiers),
            proficiency: proficiency_estimate(confidence),
            canonical_task: target.canonical_task.clone(),
            secondary_skills,
        })
    }

    /// Split `text` into fragments and match each one independently.
    pub fn match_text(&self, text: &str) -> TextMatches {
        let mut result = TextMatches::default();
        for fragment in split_fragments(text) {
            match self.match_fragment(fragment) {
                FragmentOutcome::Matched(found) => result.matches.push(found),
                FragmentOutcome::Rejected { .. } => result.rejected += 1,
                FragmentOutcome::NoMatch => result.unmatched.push(fragment.to_string()),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_and_proficiency_use_separate_bands() {
        let tiers = TierThresholds::default();
        assert_eq!(confidence_tier(0.85, &tiers), ConfidenceTier::High);
        assert_eq!(confidence_tier(0.84, &tiers), ConfidenceTier::Medium);
        assert_eq!(confidence_tier(0.49, &tiers), ConfidenceTier::Low);
        assert_eq!(proficiency_estimate(0.84), ProficiencyEstimate::Proficient);
        assert_eq!(proficiency_estimate(0.5), ProficiencyEstimate::Competent);
        assert_eq!(proficiency_estimate(0.2), ProficiencyEstimate::Beginner);
    }
}
