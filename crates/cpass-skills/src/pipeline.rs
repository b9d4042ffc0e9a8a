//! Onboarding pipeline: upload rows to worker records.

use std::ops::ControlFlow;
use std::time::Instant;

use cpass_ingest::CsvTable;
use cpass_map::detect_data_tier;
use cpass_model::{
    BatchId, ColumnMapping, ConfidenceTier, OnboardingBatch, ReviewStatus, TargetField,
    WorkerProfile, WorkerRecord,
};
use cpass_taxonomy::Taxonomy;
use tracing::{debug, info, info_span};

use crate::aggregate::{DEFAULT_SKILL_BASELINE, aggregate_worker};
use crate::matcher::{MatcherOptions, SkillMatcher};

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub matcher: MatcherOptions,
    /// Distinct skill count treated as full readiness (default: 12).
    pub skill_baseline: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            matcher: MatcherOptions::default(),
            skill_baseline: DEFAULT_SKILL_BASELINE,
        }
    }
}

/// Progress after one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowProgress {
    /// 1-based row just finished.
    pub row_number: usize,
    pub total_rows: usize,
    /// Distinct skills found for that row's worker.
    pub skills_found: usize,
}

impl RowProgress {
    pub fn percent(&self) -> u8 {
        if self.total_rows == 0 {
            return 100;
        }
        (self.row_number * 100 / self.total_rows).min(100) as u8
    }
}

/// Receives progress at row boundaries and may stop the batch.
pub trait BatchObserver {
    fn on_row(&mut self, progress: &RowProgress) -> ControlFlow<()>;
}

impl<F> BatchObserver for F
where
    F: FnMut(&RowProgress) -> ControlFlow<()>,
{
    fn on_row(&mut self, progress: &RowProgress) -> ControlFlow<()> {
        self(progress)
    }
}

/// Observer that never stops the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl BatchObserver for NoProgress {
    fn on_row(&mut self, _progress: &RowProgress) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Worker id of the `row_number`-th data row.
pub fn worker_id_for_row(row_number: usize) -> String {
    format!("row-{row_number}")
}

pub fn invitation_code(batch_id: &BatchId, row_number: usize) -> String {
    format!("INV-{batch_id}-{row_number}")
}

/// Turns mapped upload rows into worker records.
#[derive(Debug, Clone)]
pub struct OnboardingPipeline<'t> {
    matcher: SkillMatcher<'t>,
    options: PipelineOptions,
}

impl<'t> OnboardingPipeline<'t> {
    pub fn new(taxonomy: &'t Taxonomy, options: PipelineOptions) -> Self {
        Self {
            matcher: SkillMatcher::new(taxonomy, options.matcher),
            options,
        }
    }

    pub fn matcher(&self) -> &SkillMatcher<'t> {
        &self.matcher
    }

    fn profile_for_row(
        row: &[String],
        table: &CsvTable,
        mappings: &[ColumnMapping],
    ) -> WorkerProfile {
        let mut profile = WorkerProfile::default();
        for mapping in mappings.iter().filter(|m| m.is_active()) {
            if let Some(value) = table
                .column_index(&mapping.source_column)
                .and_then(|idx| row.get(idx))
            {
                profile.set(mapping.target_field, value);
            }
        }
        profile
    }

    fn build_worker(
        &self,
        batch_id: &BatchId,
        row_number: usize,
        mut profile: WorkerProfile,
        rejected: &mut usize,
    ) -> WorkerRecord {
        if profile.full_name.is_empty() {
            profile.full_name = format!("Worker {row_number}");
        }
        let worker_id = worker_id_for_row(row_number);
        let mut matches = Vec::new();
        for field in TargetField::SKILL_SOURCES {
            let Some(text) = profile.get(field) else {
                continue;
            };
            let found = self.matcher.match_text(text);
            *rejected += found.rejected;
            matches.extend(
                found
                    .matches
                    .into_iter()
                    .map(|m| m.into_skill_match(&worker_id, field)),
            );
        }
        let aggregated = aggregate_worker(
            self.matcher.taxonomy(),
            matches,
            self.options.skill_baseline,
        );
        *rejected += aggregated.discarded;
        WorkerRecord {
            invitation_code: invitation_code(batch_id, row_number),
            worker_id,
            row_number,
            profile,
            skills: aggregated.skills,
            certification_match_percentage: aggregated.percentage,
            readiness: aggregated.readiness,
        }
    }

    /// Onboard every row of `table` using `mappings`.
    ///
    /// The observer is consulted after each row; `ControlFlow::Break`
    /// stops before the next one and marks the batch as stopped early.
    pub fn run(
        &self,
        batch_id: &BatchId,
        table: &CsvTable,
        mappings: &[ColumnMapping],
        observer: &mut dyn BatchObserver,
    ) -> OnboardingBatch {
        let span = info_span!("onboard", batch_id = %batch_id, rows = table.row_count());
        let _guard = span.enter();
        let start = Instant::now();

        let data_tier = match detect_data_tier(&table.headers) {
            Ok(tier) => Some(tier),
            Err(error) => {
                debug!(%error, "data tier not detected");
                None
            }
        };

        let total_rows = table.row_count();
        let mut workers = Vec::with_capacity(total_rows);
        let mut rejected_matches = 0;
        let mut stopped_early = false;
        for (idx, row) in table.rows.iter().enumerate() {
            let row_number = idx + 1;
            let profile = Self::profile_for_row(row, table, mappings);
            let worker = self.build_worker(batch_id, row_number, profile, &mut rejected_matches);
            let progress = RowProgress {
                row_number,
                total_rows,
                skills_found: worker.skill_count(),
            };
            workers.push(worker);
            if observer.on_row(&progress).is_break() {
                stopped_early = row_number < total_rows;
                break;
            }
        }

        let batch = OnboardingBatch {
            batch_id: batch_id.clone(),
            data_tier,
            mappings: mappings.to_vec(),
            workers,
            total_rows,
            rejected_matches,
            stopped_early,
        };
        info!(
            workers = batch.workers.len(),
            skills = batch.workers.iter().map(WorkerRecord::skill_count).sum::<usize>(),
            rejected_matches,
            stopped_early,
            duration_ms = start.elapsed().as_millis(),
            "onboarding complete"
        );
        batch
    }
}

/// Approve every pending high-tier match in `batch`. Rejected matches stay
/// rejected. Returns how many matches changed.
pub fn approve_high_confidence(batch: &mut OnboardingBatch) -> usize {
    let mut approved = 0;
    for skill in batch
        .workers
        .iter_mut()
        .flat_map(|w| w.skills.values_mut())
        .filter(|s| s.tier == ConfidenceTier::High && s.needs_review())
    {
        skill.status = ReviewStatus::Approved;
        approved += 1;
    }
    approved
}
