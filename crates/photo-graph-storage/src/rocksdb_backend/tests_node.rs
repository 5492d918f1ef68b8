//! Node tests for the RocksDB backend.

use photo_graph_core::{CoreError, GraphStore, PhotoNode};
use rocksdb::WriteBatch;
use tempfile::TempDir;

use super::core::RocksDbGraphStore;
use super::error::StorageError;
use crate::column_families::cf_names;
use crate::serialization::serialize_embedding;

pub(crate) fn create_temp_db() -> (TempDir, RocksDbGraphStore) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let db = RocksDbGraphStore::open(tmp.path()).expect("Failed to open database");
    (tmp, db)
}

pub(crate) fn store_nodes(db: &RocksDbGraphStore, nodes: &[(&str, Vec<f64>)]) {
    for (id, embedding) in nodes {
        db.upsert_node(&PhotoNode::new(*id, embedding.clone()))
            .expect("node should be stored");
    }
}

#[test]
fn test_upsert_and_get_node() {
    let (_tmp, db) = create_temp_db();
    let node = PhotoNode::new("img1.jpg", vec![0.6, 0.8]);

    println!("=== TEST: upsert then get ===");
    println!("BEFORE: {:?}", node);
    db.upsert_node(&node).unwrap();

    let restored = db.get_node("img1.jpg").unwrap();
    println!("AFTER: {:?}", restored);
    assert_eq!(restored, node);
}

#[test]
fn test_upsert_replaces_embedding() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0, 0.0, 0.0])]);
    store_nodes(&db, &[("a", vec![0.0, 1.0])]);

    let nodes = db.list_nodes().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].embedding, vec![0.0, 1.0]);
}

#[test]
fn test_list_nodes_sorted_by_identity() {
    let (_tmp, db) = create_temp_db();
    store_nodes(
        &db,
        &[("c.jpg", vec![1.0]), ("a.jpg", vec![2.0]), ("b.jpg", vec![3.0])],
    );

    let ids: Vec<String> = db
        .list_nodes()
        .unwrap()
        .into_iter()
        .map(|n| n.identity)
        .collect();
    assert_eq!(ids, vec!["a.jpg", "b.jpg", "c.jpg"]);
}

#[test]
fn test_get_missing_node() {
    let (_tmp, db) = create_temp_db();
    assert!(matches!(
        db.get_node("nope"),
        Err(StorageError::NotFound { .. })
    ));
}

#[test]
fn test_invalid_node_not_stored() {
    let (_tmp, db) = create_temp_db();

    let err = db
        .upsert_node(&PhotoNode::new("bad", vec![f64::NAN]))
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidEmbedding(_)));

    let err = db
        .upsert_node(&PhotoNode::new("with\0nul", vec![1.0]))
        .unwrap_err();
    assert!(matches!(err, CoreError::StoreState(_)));

    assert_eq!(db.health().unwrap().node_count, 0);
}

#[test]
fn test_missing_embedding_detected() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0, 2.0])]);

    let cf = db.get_cf(cf_names::EMBEDDINGS).unwrap();
    db.db.delete_cf(cf, b"a").unwrap();

    let err = db.list_nodes().unwrap_err();
    println!("AFTER: {}", err);
    assert!(matches!(err, CoreError::StoreState(ref m) if m.contains("no embedding")));
}

#[test]
fn test_dimension_drift_detected() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0, 2.0])]);

    let cf = db.get_cf(cf_names::EMBEDDINGS).unwrap();
    let mut batch = WriteBatch::default();
    batch.put_cf(cf, b"a", serialize_embedding(&[1.0, 2.0, 3.0]));
    db.db.write(batch).unwrap();

    assert!(matches!(
        db.get_node("a"),
        Err(StorageError::IndexCorrupted { .. })
    ));
}
