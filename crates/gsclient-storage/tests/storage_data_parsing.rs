//! Integration tests for parsing storage data.
//!
//! These tests validate that the gsclient-storage models can deserialize
//! complete API documents, including nested relations.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use gsclient_storage::{Storage, StorageSnapshotSchedule, StorageType};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> serde_json::Value {
    let fixture_path = fixtures_dir().join(name);
    let raw = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Invalid JSON in {name}: {e}"))
}

fn load_storages() -> BTreeMap<String, Storage> {
    let mut document = load_fixture("storage_list.json");
    serde_json::from_value(document["storages"].take())
        .unwrap_or_else(|e| panic!("Failed to deserialize storage list: {e}"))
}

#[test]
fn test_deserialize_storage_list() {
    let storages = load_storages();
    assert_eq!(storages.len(), 2, "Expected 2 storages in test data");

    for (key, storage) in &storages {
        assert_eq!(key, &storage.object_uuid.to_string());
    }
}

#[test]
fn test_storage_with_relations() {
    let storages = load_storages();
    let root = storages
        .values()
        .find(|storage| storage.name == "web01-root")
        .expect("Should contain the root storage");

    assert_eq!(root.capacity, 10);
    assert_eq!(root.storage_type, Some(StorageType::StorageHigh));
    assert_eq!(root.labels, vec!["web", "prod"]);
    assert!(root.parent_uuid.is_some());
    assert!(root.create_time.is_some());

    assert_eq!(root.snapshots.len(), 1);
    let snapshot = &root.snapshots[0];
    assert_eq!(snapshot.object_name, "before-upgrade");
    assert_eq!(snapshot.schedules_snapshot_name.as_deref(), Some("nightly"));

    assert_eq!(root.relations.servers.len(), 1);
    assert!(root.relations.servers[0].bootdevice);
    assert_eq!(root.relations.snapshot_schedules.len(), 1);
    assert_eq!(root.relations.snapshot_schedules[0].keep_snapshots, Some(7));
}

#[test]
fn test_storage_without_relations() {
    let storages = load_storages();
    let scratch = storages
        .values()
        .find(|storage| storage.name == "scratch")
        .expect("Should contain the scratch storage");

    assert_eq!(scratch.storage_type, Some(StorageType::Storage));
    assert!(scratch.snapshots.is_empty());
    assert!(scratch.relations.servers.is_empty());
    assert!(scratch.last_used_template.is_none());
}

#[test]
fn test_deserialize_snapshot_schedule() {
    let mut document = load_fixture("snapshot_schedule.json");
    let schedule: StorageSnapshotSchedule =
        serde_json::from_value(document["snapshot_schedule"].take())
            .unwrap();

    assert_eq!(schedule.name, "nightly");
    assert_eq!(schedule.run_interval, 1440);
    assert_eq!(schedule.keep_snapshots, 7);
    assert_eq!(schedule.labels, vec!["backup"]);
    assert_eq!(schedule.relations.snapshots.len(), 1);
    assert_eq!(
        schedule.next_runtime.map(|t| t.to_rfc3339()),
        Some("2019-04-06T02:00:00+00:00".to_string())
    );
}

#[test]
fn test_null_collections_deserialize_as_empty() {
    let mut document = load_fixture("storage_nulls.json");
    let storage: Storage = serde_json::from_value(document["storage"].take())
        .expect("null collections should parse");

    assert_eq!(storage.storage_type, Some(StorageType::StorageInsane));
    assert!(storage.labels.is_empty());
    assert!(storage.snapshots.is_empty());
    assert!(storage.relations.servers.is_empty());
    assert!(storage.relations.snapshot_schedules.is_empty());

    let schedule: StorageSnapshotSchedule =
        serde_json::from_value(document["snapshot_schedule"].take())
            .expect("null collections should parse");
    assert!(schedule.labels.is_empty());
    assert!(schedule.relations.snapshots.is_empty());
}

#[test]
fn test_null_relations_object_deserializes_as_empty() {
    let storage: Storage = serde_json::from_value(serde_json::json!({
        "object_uuid": "7a0c8f52-2b1e-4d0a-9f3e-0c4d5e6f7a8b",
        "name": "detached",
        "capacity": 5,
        "relations": null
    }))
    .unwrap();

    assert!(storage.relations.servers.is_empty());
    assert!(storage.relations.snapshot_schedules.is_empty());
}

#[test]
fn test_unknown_storage_class_does_not_fail_listing() {
    let storage: Storage = serde_json::from_value(serde_json::json!({
        "object_uuid": "7a0c8f52-2b1e-4d0a-9f3e-0c4d5e6f7a8b",
        "name": "archive",
        "capacity": 500,
        "storage_type": "storage_archive"
    }))
    .unwrap();

    assert_eq!(
        storage.storage_type,
        Some(StorageType::Other("storage_archive".to_string()))
    );
}
