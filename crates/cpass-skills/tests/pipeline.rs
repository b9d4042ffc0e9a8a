use std::ops::ControlFlow;

use cpass_ingest::{CsvTable, parse_csv_str};
use cpass_model::{
    BatchId, ColumnMapping, ConfidenceTier, DataTier, ReadinessBucket, ReviewStatus, TargetField,
};
use cpass_skills::{
    NoProgress, OnboardingPipeline, PipelineOptions, RowProgress, approve_high_confidence,
    summarize_workers,
};
use cpass_taxonomy::{Taxonomy, TaxonomyVersion, load};

const UPLOAD: &str = "\
Full Name,Phone,Tasks,Livestock
Jane Wanjiru,0712000001,\"Weeding the maize plot, then watering seedlings\",dairy cows
,0712000002,Milking cows; Spraying pesticides,
Peter Otieno,,Driving a matatu in town,
";

fn taxonomy() -> Taxonomy {
    load(TaxonomyVersion::latest()).expect("embedded taxonomy loads")
}

fn table() -> CsvTable {
    parse_csv_str(UPLOAD, "upload.csv").unwrap()
}

fn mapping(column: &str, field: TargetField) -> ColumnMapping {
    ColumnMapping {
        source_column: column.to_string(),
        target_field: field,
        confidence: 1.0,
        sample_values: Vec::new(),
        overridden: true,
    }
}

fn mappings() -> Vec<ColumnMapping> {
    vec![
        mapping("Full Name", TargetField::FullName),
        mapping("Phone", TargetField::Phone),
        mapping("Tasks", TargetField::TaskDescription),
        mapping("Livestock", TargetField::Livestock),
    ]
}

fn batch_id() -> BatchId {
    BatchId::new("KALRO-01").unwrap()
}

#[test]
fn onboards_every_row() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut NoProgress);

    assert_eq!(batch.total_rows, 3);
    assert_eq!(batch.workers.len(), 3);
    assert_eq!(batch.data_tier, Some(DataTier::Basic));
    assert!(!batch.stopped_early);
    assert_eq!(batch.rejected_matches, 0);

    let jane = &batch.workers[0];
    assert_eq!(jane.worker_id, "row-1");
    assert_eq!(jane.invitation_code, "INV-KALRO-01-1");
    assert_eq!(jane.profile.phone.as_deref(), Some("0712000001"));
    let ids: Vec<&str> = jane.skill_ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["CP001", "CP003", "LV002"]);
    assert_eq!(jane.skills["LV002"].source_field, TargetField::Livestock);
    assert_eq!(jane.skills["CP003"].tier, ConfidenceTier::Medium);
    assert_eq!(jane.skills["CP003"].status, ReviewStatus::Pending);
    assert_eq!(jane.certification_match_percentage, 25);
    assert_eq!(jane.readiness, ReadinessBucket::EarlyStage);

    let unnamed = &batch.workers[1];
    assert_eq!(unnamed.profile.full_name, "Worker 2");
    assert_eq!(unnamed.skill_count(), 2);

    let peter = batch.worker("row-3").unwrap();
    assert_eq!(peter.skill_count(), 0);
    assert_eq!(peter.certification_match_percentage, 0);
}

#[test]
fn ignored_columns_do_not_feed_matching() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let mut mappings = mappings();
    mappings[3].target_field = TargetField::Ignore;
    let batch = pipeline.run(&batch_id(), &table(), &mappings, &mut NoProgress);

    assert!(batch.workers[0].profile.livestock.is_none());
    assert!(!batch.workers[0].skills.contains_key("LV002"));
}

#[test]
fn observer_can_stop_the_batch() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let mut seen = Vec::new();
    let mut stop_after_first = |p: &RowProgress| {
        seen.push((p.row_number, p.skills_found, p.percent()));
        ControlFlow::Break(())
    };
    let batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut stop_after_first);

    assert!(batch.stopped_early);
    assert_eq!(batch.workers.len(), 1);
    assert_eq!(batch.total_rows, 3);
    assert_eq!(seen, vec![(1, 3, 33)]);
}

#[test]
fn stopping_on_the_last_row_is_not_early() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let mut on_last = |p: &RowProgress| {
        if p.row_number == p.total_rows {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };
    let batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut on_last);
    assert!(!batch.stopped_early);
    assert_eq!(batch.workers.len(), 3);
}

#[test]
fn approves_pending_high_tier_matches() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let mut batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut NoProgress);

    assert_eq!(approve_high_confidence(&mut batch), 0);
    if let Some(milking) = batch.workers[1].skills.get_mut("LV002") {
        milking.status = ReviewStatus::Pending;
    }
    assert_eq!(approve_high_confidence(&mut batch), 1);
    assert_eq!(
        batch.workers[0].skills["CP003"].status,
        ReviewStatus::Pending
    );
}

#[test]
fn summary_counts_tiers_and_readiness() {
    let taxonomy = taxonomy();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut NoProgress);
    let summary = summarize_workers(&batch.workers);

    assert_eq!(summary.total_workers, 3);
    assert_eq!(summary.workers_with_skills, 2);
    assert_eq!(summary.total_matches, 5);
    assert_eq!(
        (
            summary.high_confidence,
            summary.medium_confidence,
            summary.low_confidence
        ),
        (4, 1, 0)
    );
    assert_eq!(summary.early_stage, 3);
    assert!((summary.average_skills_per_worker - 5.0 / 3.0).abs() < 1e-6);
}

#[test]
fn smaller_baseline_raises_readiness() {
    let taxonomy = taxonomy();
    let options = PipelineOptions {
        skill_baseline: 3,
        ..PipelineOptions::default()
    };
    let pipeline = OnboardingPipeline::new(&taxonomy, options);
    let batch = pipeline.run(&batch_id(), &table(), &mappings(), &mut NoProgress);
    assert_eq!(batch.workers[0].certification_match_percentage, 100);
    assert_eq!(batch.workers[0].readiness, ReadinessBucket::Ready);
    assert_eq!(batch.workers[1].readiness, ReadinessBucket::InProgress);
}
