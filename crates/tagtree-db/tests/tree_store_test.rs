//! Integration tests for the leaf-record store and tree projection.

use tagtree_db::leaves::EMPTY_PROJECTION_MESSAGE;
use tagtree_db::{CanonicalPath, LeafRecordRepository, LevelType, Registry, SensorStatus};

fn paths(raw: &[&str]) -> Vec<CanonicalPath> {
    raw.iter().map(|p| CanonicalPath::parse(p)).collect()
}

#[tokio::test]
async fn test_ingest_counts_created_then_existing() {
    let registry = Registry::connect_in_memory().await.unwrap();
    let set = paths(&["A/B/s1", "A/B/s2", "A/C/s3"]);

    let first = registry.leaves.ingest(&set).await.unwrap();
    assert_eq!(first.created, 3);
    assert_eq!(first.existing, 0);

    // Re-ingesting the same set is a counted no-op, never an error.
    let second = registry.leaves.ingest(&set).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.existing, 3);
    assert_eq!(registry.leaves.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_ingest_partial_overlap() {
    let registry = Registry::connect_in_memory().await.unwrap();
    registry
        .leaves
        .ingest(&paths(&["A/B/s1"]))
        .await
        .unwrap();

    let report = registry
        .leaves
        .ingest(&paths(&["A/B/s1", "A/B/s2"]))
        .await
        .unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.existing, 1);
}

#[tokio::test]
async fn test_list_paths_preserves_insertion_order() {
    let registry = Registry::connect_in_memory().await.unwrap();
    registry
        .leaves
        .ingest(&paths(&["Z/s1", "A/s2", "M/s3"]))
        .await
        .unwrap();

    let listed = registry.leaves.list_paths().await.unwrap();
    let strings: Vec<String> = listed.iter().map(|p| p.to_string()).collect();
    assert_eq!(strings, vec!["Z/s1", "A/s2", "M/s3"]);
}

#[tokio::test]
async fn test_project_rebuilds_tree_from_records() {
    let registry = Registry::connect_in_memory().await.unwrap();
    registry
        .leaves
        .ingest(&paths(&["A/B/sensor1", "A/B/sensor2", "A/C/sensor3"]))
        .await
        .unwrap();

    let tree = registry.project().await.unwrap();
    assert_eq!(tree.id, "root");
    assert!(tree.message.is_none());

    let a = tree.child("A").unwrap();
    assert!(a.status.is_none());
    let b = a.child("B").unwrap();
    assert_eq!(b.children.len(), 2);
    assert_eq!(
        b.child("sensor1").unwrap().status,
        Some(SensorStatus::Online)
    );
    assert_eq!(b.child("sensor1").unwrap().level_type, LevelType::Sensor);
    assert_eq!(a.child("C").unwrap().children.len(), 1);
}

#[tokio::test]
async fn test_project_is_stable_across_calls() {
    let registry = Registry::connect_in_memory().await.unwrap();
    registry
        .leaves
        .ingest(&paths(&["A/B/s1", "A/C/s2"]))
        .await
        .unwrap();

    let once = registry.project().await.unwrap();
    let twice = registry.project().await.unwrap();
    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_project_empty_store_returns_marked_root() {
    let registry = Registry::connect_in_memory().await.unwrap();

    let tree = registry.project().await.unwrap();
    assert_eq!(tree.id, "root");
    assert!(tree.children.is_empty());
    assert_eq!(tree.message.as_deref(), Some(EMPTY_PROJECTION_MESSAGE));
}
