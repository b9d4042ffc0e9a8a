use std::fs;

use cpass_map::{
    MappingConfig, MappingConfigLoader, MappingError, MappingRepository, StoredMappingConfig,
    merge_mappings,
};
use cpass_model::{BatchId, ColumnMapping, TargetField};
use tempfile::TempDir;

/// A repository in a fresh directory, removed when the `TempDir` drops.
fn open_repo() -> (TempDir, MappingRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = MappingRepository::new(dir.path().join("mappings")).unwrap();
    (dir, repo)
}

fn batch(id: &str) -> BatchId {
    BatchId::new(id).expect("valid batch id")
}

fn sample_config(batch_id: &str) -> MappingConfig {
    MappingConfig {
        batch_id: batch(batch_id),
        mappings: vec![
            ColumnMapping {
                source_column: "Jina".to_string(),
                target_field: TargetField::FullName,
                confidence: 1.0,
                sample_values: vec!["Amina".to_string()],
                overridden: true,
            },
            ColumnMapping {
                source_column: "Tasks".to_string(),
                target_field: TargetField::TaskDescription,
                confidence: 0.95,
                sample_values: vec![],
                overridden: false,
            },
            ColumnMapping {
                source_column: "Remarks".to_string(),
                target_field: TargetField::Ignore,
                confidence: 0.3,
                sample_values: vec![],
                overridden: false,
            },
        ],
    }
}

#[test]
fn repository_save_and_load() {
    let (_dir, repo) = open_repo();

    let path = repo.save(&sample_config("nakuru-01")).expect("save mapping");
    assert!(path.exists());
    assert!(path.to_string_lossy().ends_with("NAKURU-01.json"));

    let loaded = repo
        .load(&batch("NAKURU-01"))
        .expect("load mapping")
        .expect("mapping should exist");
    assert_eq!(loaded, sample_config("NAKURU-01"));
    assert_eq!(loaded.ignored_columns(), vec!["Remarks"]);
}

#[test]
fn repository_load_nonexistent() {
    let (_dir, repo) = open_repo();

    assert!(repo.load(&batch("NOEXIST")).expect("load attempt").is_none());
}

#[test]
fn repository_exists_and_delete() {
    let (_dir, repo) = open_repo();

    assert!(!repo.exists(&batch("B1")));
    repo.save(&sample_config("B1")).expect("save mapping");
    assert!(repo.exists(&batch("B1")));
    assert!(!repo.exists(&batch("B2")));

    assert!(repo.delete(&batch("B1")).expect("delete"));
    assert!(!repo.exists(&batch("B1")));
    assert!(!repo.delete(&batch("B1")).expect("delete again"));
}

#[test]
fn repository_list_skips_foreign_files() {
    let (_dir, repo) = open_repo();

    repo.save(&sample_config("B2")).expect("save");
    repo.save(&sample_config("B1")).expect("save");
    fs::write(repo.base_dir().join("notes.json"), "{ not a mapping").expect("write junk");
    fs::write(repo.base_dir().join("README.txt"), "hello").expect("write junk");

    let list = repo.list().expect("list mappings");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].batch_id, batch("B1"));
    assert_eq!(list[1].batch_id, batch("B2"));
    assert_eq!(list[0].mapping_count, 3);
    assert_eq!(list[0].ignored_count, 1);
}

#[test]
fn stored_config_with_metadata() {
    let (_dir, repo) = open_repo();

    let stored =
        StoredMappingConfig::new(sample_config("B1")).with_description("Nakuru cooperative form");
    repo.save_stored(&stored).expect("save stored");

    let loaded = repo
        .load_stored(&batch("B1"))
        .expect("load")
        .expect("exists");
    assert_eq!(
        loaded.description,
        Some("Nakuru cooperative form".to_string())
    );
    let saved_at = loaded.saved_at.expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(&saved_at).is_ok());
    assert_eq!(loaded.version, "1.0");
}

#[test]
fn corrupt_mapping_is_a_typed_error() {
    let (_dir, repo) = open_repo();
    fs::write(repo.base_dir().join("B1.json"), "[]").expect("write junk");

    assert!(matches!(
        repo.load(&batch("B1")),
        Err(MappingError::Json { .. })
    ));
}

#[test]
fn mapping_config_loader_with_repository() {
    let (_dir, repo) = open_repo();
    repo.save(&sample_config("B1")).expect("save");

    let loader = MappingConfigLoader::new(batch("B1")).with_repository(repo.clone());
    let config = loader
        .load_or_default(|| panic!("should not call default"))
        .expect("load");
    assert_eq!(config.mappings.len(), 3);

    let loader = MappingConfigLoader::new(batch("B9")).with_repository(repo);
    let config = loader
        .load_or_default(|| MappingConfig {
            batch_id: batch("B9"),
            mappings: vec![],
        })
        .expect("load");
    assert!(config.mappings.is_empty());
}

#[test]
fn mapping_config_loader_without_repository() {
    let loader = MappingConfigLoader::new(batch("B1"));
    let config = loader
        .load_or_default(|| sample_config("B1"))
        .expect("load");
    assert_eq!(config.batch_id, batch("B1"));
    assert!(loader.save(&config).expect("save").is_none());
}

#[test]
fn stored_overrides_merge_into_new_detection() {
    let detected = vec![ColumnMapping {
        source_column: "Jina".to_string(),
        target_field: TargetField::Ignore,
        confidence: 0.3,
        sample_values: vec!["Juma".to_string()],
        overridden: false,
    }];
    let merged = merge_mappings(&detected, &sample_config("B1").mappings);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].target_field, TargetField::FullName);
    assert_eq!(merged[0].sample_values, vec!["Juma"]);
}
