use cpass_ingest::parse_csv_str;
use cpass_map::{ConfidenceLevel, MappingEngine, NO_MATCH_CONFIDENCE};
use cpass_model::TargetField;
use proptest::prelude::*;

const UPLOAD: &str = "\
Farmer Full Name,Phone Number,County,Tasks Done,Crops Grown,Remarks
Amina Wanjiru,0712000001,Nakuru,\"Weeding the maize plot, then watering seedlings\",maize,
Juma Otieno,,Kisumu,Milking cows,,left early
Achieng,0712000003,Kisumu,Harvesting,beans,
Kamau,0712000004,Nyeri,Pruning,coffee,
";

#[test]
fn maps_a_typical_upload() {
    let table = parse_csv_str(UPLOAD, "upload.csv").unwrap();
    let result = MappingEngine::new().suggest(&table);
    let fields: Vec<TargetField> = result.mappings.iter().map(|m| m.target_field).collect();
    assert_eq!(
        fields,
        vec![
            TargetField::FullName,
            TargetField::Phone,
            TargetField::Location,
            TargetField::TaskDescription,
            TargetField::PrimaryCrops,
            TargetField::Ignore,
        ]
    );
    assert_eq!(result.column_for(TargetField::TaskDescription), Some("Tasks Done"));
    assert_eq!(result.ignored_columns(), vec!["Remarks"]);
    assert_eq!(result.active_mappings().count(), 5);

    // Samples come from the first three rows and skip blanks.
    let phone = &result.mappings[1];
    assert_eq!(phone.sample_values, vec!["0712000001", "0712000003"]);
    let remarks = &result.mappings[5];
    assert_eq!(remarks.sample_values, vec!["left early"]);
    assert!((remarks.confidence - NO_MATCH_CONFIDENCE).abs() < 1e-6);
}

#[test]
fn groups_mappings_by_band() {
    let table = parse_csv_str(UPLOAD, "upload.csv").unwrap();
    let result = MappingEngine::new().suggest(&table);
    let counts = result.count_by_level();
    let total: usize = counts.values().sum();
    assert_eq!(total, result.mappings.len());
    let low = result.group_by_level();
    assert!(
        low[&ConfidenceLevel::Low]
            .iter()
            .any(|m| m.source_column == "Remarks")
    );
    assert!(
        result
            .filter_by_level(ConfidenceLevel::Medium)
            .iter()
            .all(|m| m.confidence >= 0.5)
    );
}

#[test]
fn sample_rows_and_confidence_stats() {
    let table = parse_csv_str(UPLOAD, "upload.csv").unwrap();
    let result = MappingEngine::new().suggest(&table);
    assert_eq!(result.mappings[1].sample_values, vec!["0712000001", "0712000003"]);
    assert_eq!(result.min_confidence(), Some(NO_MATCH_CONFIDENCE));
    let mean = result.mean_confidence().unwrap();
    assert!(mean > NO_MATCH_CONFIDENCE && mean < 0.95);

    let narrow = MappingEngine::new().with_sample_rows(1).suggest(&table);
    assert_eq!(narrow.mappings[1].sample_values, vec!["0712000001"]);
    assert!(narrow.mappings[5].sample_values.is_empty());

    let empty = MappingEngine::new().suggest_headers(&[], &[]);
    assert_eq!(empty.mean_confidence(), None);
}

proptest! {
    #[test]
    fn scoring_is_deterministic_and_bounded(header in "[A-Za-z _]{0,40}") {
        let engine = MappingEngine::new();
        let first = engine.score_header(&header);
        let second = engine.score_header(&header);
        prop_assert_eq!(first, second);
        let (field, confidence) = first;
        prop_assert!((0.0..=1.0).contains(&confidence));
        if field == TargetField::Ignore {
            prop_assert!((confidence - NO_MATCH_CONFIDENCE).abs() < 1e-6);
        } else {
            prop_assert!(confidence <= 0.95);
        }
    }

    #[test]
    fn suggestions_are_idempotent(headers in prop::collection::vec("[A-Za-z ]{1,20}", 0..8)) {
        let engine = MappingEngine::new();
        let samples: Vec<Vec<String>> = headers.iter().map(|h| vec![h.clone()]).collect();
        let first = engine.suggest_headers(&headers, &samples);
        let second = engine.suggest_headers(&headers, &samples);
        prop_assert_eq!(first, second);
    }
}
