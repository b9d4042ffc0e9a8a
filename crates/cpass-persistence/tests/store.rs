//! Behaviour shared by every `WorkerStore` implementation.

use std::collections::BTreeMap;
use std::fs;

use cpass_model::{
    BatchId, ConfidenceTier, DataTier, OnboardingBatch, ProficiencyEstimate, ReadinessBucket,
    ReviewStatus, SkillId, SkillMatch, TargetField, WorkerProfile, WorkerRecord,
};
use cpass_persistence::{InMemoryWorkerStore, JsonWorkerStore, PersistenceError, WorkerStore};
use tempfile::tempdir;

fn worker(row_number: usize, batch: &str) -> WorkerRecord {
    let skill_id = SkillId::new("LV002").unwrap();
    let skill = SkillMatch {
        worker_id: format!("row-{row_number}"),
        source_field: TargetField::Livestock,
        raw_text: "Milking cows".to_string(),
        skill_id: skill_id.clone(),
        skill_name: "Milking Operations".to_string(),
        confidence: 0.95,
        tier: ConfidenceTier::High,
        proficiency: ProficiencyEstimate::Proficient,
        canonical_task: Some("Milking cows using machines".to_string()),
        secondary_skills: vec![SkillId::new("MC002").unwrap()],
        status: ReviewStatus::Approved,
    };
    WorkerRecord {
        worker_id: format!("row-{row_number}"),
        row_number,
        invitation_code: format!("INV-{batch}-{row_number}"),
        profile: WorkerProfile {
            full_name: format!("Worker {row_number}"),
            ..WorkerProfile::default()
        },
        skills: BTreeMap::from([(skill_id, skill)]),
        certification_match_percentage: 8,
        readiness: ReadinessBucket::EarlyStage,
    }
}

fn batch(id: &str, workers: usize) -> OnboardingBatch {
    let batch_id = BatchId::new(id).unwrap();
    OnboardingBatch {
        workers: (1..=workers).map(|n| worker(n, batch_id.as_str())).collect(),
        batch_id,
        data_tier: Some(DataTier::Basic),
        mappings: Vec::new(),
        total_rows: workers,
        rejected_matches: 0,
        stopped_early: false,
    }
}

fn exercise_store(store: &mut dyn WorkerStore) {
    let first = batch("kalro-02", 2);
    let second = batch("kalro-01", 1);
    store.save_batch(&first).unwrap();
    store.save_batch(&second).unwrap();

    let loaded = store.load_batch(&first.batch_id).unwrap();
    assert_eq!(loaded, first);

    let listings = store.list_batches().unwrap();
    let ids: Vec<&str> = listings.iter().map(|l| l.batch_id.as_str()).collect();
    assert_eq!(ids, vec!["KALRO-01", "KALRO-02"]);
    assert_eq!((listings[1].workers, listings[1].skills), (2, 2));

    let mut replaced = first.clone();
    replaced.workers.truncate(1);
    store.save_batch(&replaced).unwrap();
    assert_eq!(store.load_batch(&first.batch_id).unwrap().workers.len(), 1);
    assert_eq!(store.list_batches().unwrap().len(), 2);

    assert!(store.contains_batch(&second.batch_id).unwrap());
    assert!(store.delete_batch(&second.batch_id).unwrap());
    assert!(!store.delete_batch(&second.batch_id).unwrap());
    assert!(!store.contains_batch(&second.batch_id).unwrap());
    assert!(matches!(
        store.load_batch(&second.batch_id),
        Err(PersistenceError::BatchNotFound(_))
    ));
}

#[test]
fn in_memory_store_behaviour() {
    let mut store = InMemoryWorkerStore::new();
    exercise_store(&mut store);
    assert_eq!(store.len(), 1);
}

#[test]
fn json_store_behaviour() {
    let dir = tempdir().unwrap();
    let mut store = JsonWorkerStore::new(dir.path());
    exercise_store(&mut store);
}

#[test]
fn json_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let original = batch("coop-7", 3);
    JsonWorkerStore::new(dir.path())
        .save_batch(&original)
        .unwrap();

    let reopened = JsonWorkerStore::new(dir.path());
    let loaded = reopened.load_batch(&original.batch_id).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.workers[2].invitation_code, "INV-COOP-7-3");
}

#[test]
fn json_store_lists_past_corrupt_files() {
    let dir = tempdir().unwrap();
    let mut store = JsonWorkerStore::new(dir.path());
    store.save_batch(&batch("good", 1)).unwrap();
    fs::write(dir.path().join("BAD.batch.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let listings = store.list_batches().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].batch_id.as_str(), "GOOD");

    let bad = BatchId::new("bad").unwrap();
    assert!(matches!(
        store.load_batch(&bad),
        Err(PersistenceError::InvalidFormat { .. })
    ));
}

#[test]
fn json_store_will_not_overwrite_unreadable_documents() {
    let dir = tempdir().unwrap();
    let mut store = JsonWorkerStore::new(dir.path());
    let newer = dir.path().join("B1.batch.json");
    let newer_content = r#"{"schema_version": 99, "batch": {}}"#;
    fs::write(&newer, newer_content).unwrap();

    let error = store.save_batch(&batch("b1", 1)).unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::UnsupportedVersion { found: 99, .. }
    ));
    assert_eq!(fs::read_to_string(&newer).unwrap(), newer_content);

    let corrupt = dir.path().join("B2.batch.json");
    fs::write(&corrupt, "{ not json").unwrap();
    assert!(matches!(
        store.save_batch(&batch("b2", 1)),
        Err(PersistenceError::InvalidFormat { .. })
    ));
    assert_eq!(fs::read_to_string(&corrupt).unwrap(), "{ not json");

    store.save_batch(&batch("b3", 1)).unwrap();
    assert!(store.contains_batch(&BatchId::new("b3").unwrap()).unwrap());
}

#[test]
fn missing_directory_lists_nothing() {
    let dir = tempdir().unwrap();
    let store = JsonWorkerStore::new(dir.path().join("never-created"));
    assert!(store.list_batches().unwrap().is_empty());
}

#[test]
fn in_memory_store_can_be_seeded() {
    let store = InMemoryWorkerStore::with_batches([batch("a", 1), batch("b", 2)]);
    assert_eq!(store.len(), 2);
    let document = store.document(&BatchId::new("b").unwrap()).unwrap();
    assert!(document.created_at().is_some());
    assert_eq!(document.batch.workers.len(), 2);
}
