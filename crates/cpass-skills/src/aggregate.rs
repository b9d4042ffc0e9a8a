//! Per-worker rollup and batch summary.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use cpass_model::{ConfidenceTier, ReadinessBucket, SkillId, SkillMatch, WorkerRecord};
use cpass_taxonomy::Taxonomy;
use serde::Serialize;
use tracing::warn;

/// Distinct skill count that counts as full certification readiness.
pub const DEFAULT_SKILL_BASELINE: usize = 12;
/// Readiness percentage from which a worker is certification ready.
pub const READY_PERCENT: u8 = 80;
/// Readiness percentage from which a worker is in progress.
pub const IN_PROGRESS_PERCENT: u8 = 50;

/// Keep one match per skill id: the highest confidence, first seen on ties.
pub fn dedupe_matches<I>(matches: I) -> BTreeMap<SkillId, SkillMatch>
where
    I: IntoIterator<Item = SkillMatch>,
{
    let mut skills: BTreeMap<SkillId, SkillMatch> = BTreeMap::new();
    for candidate in matches {
        match skills.entry(candidate.skill_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.confidence > slot.get().confidence {
                    slot.insert(candidate);
                }
            }
        }
    }
    skills
}

/// `min(round(distinct / baseline * 100), 100)`, halves rounded up.
///
/// A zero baseline is treated as one. Computed in `u128` so any `usize`
/// pair is exact.
pub fn certification_match_percentage(distinct_skills: usize, baseline: usize) -> u8 {
    let baseline = baseline.max(1) as u128;
    let distinct = distinct_skills as u128;
    let rounded = (distinct * 200 + baseline) / (2 * baseline);
    rounded.min(100) as u8
}

pub fn readiness_bucket(percentage: u8) -> ReadinessBucket {
    if percentage >= READY_PERCENT {
        ReadinessBucket::Ready
    } else if percentage >= IN_PROGRESS_PERCENT {
        ReadinessBucket::InProgress
    } else {
        ReadinessBucket::EarlyStage
    }
}

/// A worker's deduplicated skills and readiness.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSkills {
    pub skills: BTreeMap<SkillId, SkillMatch>,
    pub percentage: u8,
    pub readiness: ReadinessBucket,
    /// Matches dropped because their skill id is not in the taxonomy.
    pub discarded: usize,
}

/// Roll up all matches of one worker.
///
/// Matches naming a skill the taxonomy does not define are dropped with a
/// warning and never count toward the percentage.
pub fn aggregate_worker<I>(taxonomy: &Taxonomy, matches: I, baseline: usize) -> AggregatedSkills
where
    I: IntoIterator<Item = SkillMatch>,
{
    let mut discarded = 0;
    let known = matches.into_iter().filter(|m| {
        let known = taxonomy.contains(m.skill_id.as_str());
        if !known {
            warn!(
                skill_id = %m.skill_id,
                worker_id = %m.worker_id,
                "discarding match for unknown skill"
            );
            discarded += 1;
        }
        known
    });
    let skills = dedupe_matches(known);
    let percentage = certification_match_percentage(skills.len(), baseline);
    AggregatedSkills {
        skills,
        percentage,
        readiness: readiness_bucket(percentage),
        discarded,
    }
}

/// Trust score from 1-10 self ratings: `round(mean * 10)`, 0 without ratings.
pub fn trust_score(ratings: &[u8]) -> u8 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let count = ratings.len() as u32;
    // mean * 10 rounded half up, in integers
    let rounded = (sum * 20 + count) / (2 * count);
    rounded.min(u32::from(u8::MAX)) as u8
}

/// Counts across an onboarded batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_workers: usize,
    pub workers_with_skills: usize,
    /// Deduplicated skill matches across all workers.
    pub total_matches: usize,
    pub average_skills_per_worker: f32,
    pub average_confidence: f32,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub ready: usize,
    pub in_progress: usize,
    pub early_stage: usize,
}

pub fn summarize_workers(workers: &[WorkerRecord]) -> BatchSummary {
    let mut summary = BatchSummary {
        total_workers: workers.len(),
        ..BatchSummary::default()
    };
    let mut confidence_sum = 0.0_f32;
    for worker in workers {
        if worker.skill_count() > 0 {
            summary.workers_with_skills += 1;
        }
        match worker.readiness {
            ReadinessBucket::Ready => summary.ready += 1,
            ReadinessBucket::InProgress => summary.in_progress += 1,
            ReadinessBucket::EarlyStage => summary.early_stage += 1,
        }
        for skill in worker.skills.values() {
            summary.total_matches += 1;
            confidence_sum += skill.confidence;
            match skill.tier {
                ConfidenceTier::High => summary.high_confidence += 1,
                ConfidenceTier::Medium => summary.medium_confidence += 1,
                ConfidenceTier::Low => summary.low_confidence += 1,
            }
        }
    }
    if summary.total_workers > 0 {
        summary.average_skills_per_worker =
            summary.total_matches as f32 / summary.total_workers as f32;
    }
    if summary.total_matches > 0 {
        summary.average_confidence = confidence_sum / summary.total_matches as f32;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_and_caps() {
        assert_eq!(certification_match_percentage(0, 12), 0);
        assert_eq!(certification_match_percentage(1, 12), 8);
        assert_eq!(certification_match_percentage(6, 12), 50);
        assert_eq!(certification_match_percentage(10, 12), 83);
        assert_eq!(certification_match_percentage(15, 12), 100);
        // 1/8 = 12.5 rounds up
        assert_eq!(certification_match_percentage(1, 8), 13);
        assert_eq!(certification_match_percentage(3, 0), 100);
        assert_eq!(certification_match_percentage(3, usize::MAX), 0);
        assert_eq!(certification_match_percentage(usize::MAX, 12), 100);
    }

    #[test]
    fn buckets_follow_readiness_bands() {
        assert_eq!(readiness_bucket(100), ReadinessBucket::Ready);
        assert_eq!(readiness_bucket(80), ReadinessBucket::Ready);
        assert_eq!(readiness_bucket(79), ReadinessBucket::InProgress);
        assert_eq!(readiness_bucket(50), ReadinessBucket::InProgress);
        assert_eq!(readiness_bucket(49), ReadinessBucket::EarlyStage);
    }

    #[test]
    fn trust_score_is_scaled_mean() {
        assert_eq!(trust_score(&[]), 0);
        assert_eq!(trust_score(&[8, 9, 7]), 80);
        assert_eq!(trust_score(&[7, 8]), 75);
        assert_eq!(trust_score(&[10]), 100);
    }
}
