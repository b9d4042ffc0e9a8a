//! Integration tests for command reports.

use std::path::Path;

use cpass_cli::report::{
    ColumnsReport, OnboardReport, certify_report, derive_batch_id, match_report,
};
use cpass_ingest::parse_csv_str;
use cpass_map::{MappingEngine, MappingResult, MappingReview};
use cpass_model::{BatchId, ColumnMapping, ReadinessBucket, TargetField, WorkerProficiency};
use cpass_skills::{
    MatcherOptions, NoProgress, OnboardingPipeline, PipelineOptions, SkillMatcher,
};
use cpass_taxonomy::{Taxonomy, TaxonomyVersion, load};

fn taxonomy() -> Taxonomy {
    load(TaxonomyVersion::latest()).expect("embedded taxonomy loads")
}

#[test]
fn batch_id_comes_from_the_file_stem() {
    let id = derive_batch_id(Path::new("/uploads/kalro cohort 1.csv")).unwrap();
    assert_eq!(id.as_str(), "KALRO-COHORT-1");

    let id = derive_batch_id(Path::new("../COOP_07.csv")).unwrap();
    assert_eq!(id.as_str(), "COOP_07");

    let id = derive_batch_id(Path::new("...csv")).unwrap();
    assert_eq!(id.as_str(), "BATCH");
}

#[test]
fn match_report_keeps_fragment_order() {
    let taxonomy = taxonomy();
    let matcher = SkillMatcher::new(&taxonomy, MatcherOptions::default());
    let lines = match_report(
        &matcher,
        "Weeding the maize plot, ok, Driving a matatu in town; Milking cows",
    );

    let rendered: Vec<String> = lines
        .iter()
        .map(|l| {
            format!(
                "{} | {} | {}",
                l.fragment,
                l.outcome,
                l.skill_id.as_ref().map_or("-", |id| id.as_str())
            )
        })
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    Weeding the maize plot | matched | CP003
    Driving a matatu in town | no_match | -
    Milking cows | matched | LV002
    ");
    assert_eq!(lines[2].secondary_skills.len(), 1);
}

#[test]
fn no_match_lines_serialize_without_match_fields() {
    let taxonomy = taxonomy();
    let matcher = SkillMatcher::new(&taxonomy, MatcherOptions::default());
    let lines = match_report(&matcher, "Driving a matatu in town");
    insta::assert_json_snapshot!(lines, @r#"
    [
      {
        "fragment": "Driving a matatu in town",
        "outcome": "no_match"
      }
    ]
    "#);
}

#[test]
fn certify_report_covers_known_skills() {
    let taxonomy = taxonomy();
    let skills = vec![
        "lv002".to_string(),
        "LV001".to_string(),
        "CP005".to_string(),
        "ZZ999".to_string(),
    ];
    let report = certify_report(&taxonomy, &skills, &[9, 7, 4, 2]).unwrap();

    let ids: Vec<&str> = report.skills.iter().map(|s| s.skill_id.as_str()).collect();
    assert_eq!(ids, vec!["LV002", "LV001", "CP005"]);
    assert_eq!(report.skills[0].name, "Milking Operations");
    assert_eq!(report.skills[0].proficiency, Some(WorkerProficiency::Expert));
    assert_eq!(report.skills[2].proficiency, Some(WorkerProficiency::Competent));
    assert_eq!(report.unknown_skills, vec!["ZZ999"]);
    assert_eq!(report.trust_score, Some(67));

    assert_eq!(report.certifications[0].certification, "Safe Use of Pesticides");
    assert_eq!(report.certifications[0].percentage, 100);
    assert!(!report.pathways.is_empty());
}

#[test]
fn certify_report_without_ratings_has_no_trust_score() {
    let taxonomy = taxonomy();
    let report = certify_report(&taxonomy, &["CP001".to_string()], &[]).unwrap();
    assert_eq!(report.trust_score, None);
    assert_eq!(report.skills[0].rating, None);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("trust_score").is_none());
}

#[test]
fn trust_score_ignores_unknown_and_repeated_skills() {
    let taxonomy = taxonomy();
    let skills = vec![
        "CP001".to_string(),
        "cp001".to_string(),
        "ZZ999".to_string(),
        "CP002".to_string(),
    ];
    let report = certify_report(&taxonomy, &skills, &[8, 1, 1, 7]).unwrap();
    assert_eq!(report.skills.len(), 2);
    assert_eq!(report.trust_score, Some(75));

    let report = certify_report(&taxonomy, &["ZZ999".to_string()], &[10]).unwrap();
    assert_eq!(report.trust_score, None);
}

#[test]
fn certify_report_rejects_mismatched_ratings() {
    let taxonomy = taxonomy();
    let skills = vec!["CP001".to_string(), "CP002".to_string()];
    let error = certify_report(&taxonomy, &skills, &[5]).unwrap_err();
    assert!(error.to_string().contains("1 ratings for 2 skills"));
}

#[test]
fn columns_report_lists_unrecognized_headers() {
    let table = parse_csv_str("Full Name,Favourite Colour\nJane,green\n", "upload.csv").unwrap();
    let batch_id = BatchId::new("COLS").unwrap();
    let review = MappingReview::new(batch_id, MappingEngine::new().suggest(&table));
    let report = ColumnsReport::new(None, review.mappings(), review.summary());

    let unrecognized: Vec<&str> = report
        .unrecognized()
        .map(|c| c.column.as_str())
        .collect();
    assert_eq!(unrecognized, vec!["Favourite Colour"]);
    assert_eq!(report.columns[0].samples, vec!["Jane"]);
}

#[test]
fn onboard_report_summarizes_the_batch() {
    let taxonomy = taxonomy();
    let table = parse_csv_str(
        "Name,Tasks\nJane Wanjiru,\"Weeding the maize plot, then watering seedlings\"\nPeter,\n",
        "upload.csv",
    )
    .unwrap();
    let mappings = vec![
        ColumnMapping {
            source_column: "Name".to_string(),
            target_field: TargetField::FullName,
            confidence: 1.0,
            sample_values: Vec::new(),
            overridden: true,
        },
        ColumnMapping {
            source_column: "Tasks".to_string(),
            target_field: TargetField::TaskDescription,
            confidence: 1.0,
            sample_values: Vec::new(),
            overridden: true,
        },
    ];
    let batch_id = BatchId::new("COOP-7").unwrap();
    let pipeline = OnboardingPipeline::new(&taxonomy, PipelineOptions::default());
    let batch = pipeline.run(&batch_id, &table, &mappings, &mut NoProgress);
    let review = MappingReview::new(
        batch_id,
        MappingResult {
            mappings: mappings.clone(),
        },
    );
    let report = OnboardReport::new(&batch, review.summary());

    assert_eq!(report.processed_rows, 2);
    assert_eq!(report.mapping.overridden, 2);
    assert_eq!(report.summary.workers_with_skills, 1);
    assert_eq!(report.workers[0].invitation_code, "INV-COOP-7-1");
    assert_eq!(report.workers[0].skills.len(), 2);
    assert_eq!(report.workers[1].name, "Peter");
    assert_eq!(report.workers[1].readiness, ReadinessBucket::EarlyStage);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["batch_id"], "COOP-7");
    assert!(json.get("store_path").is_none());
}
