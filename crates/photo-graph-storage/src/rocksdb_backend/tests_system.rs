//! Reset and health tests for the RocksDB backend.

use photo_graph_core::{GraphStore, SimilarityEdge};

use super::tests_node::{create_temp_db, store_nodes};
use crate::column_families::cf_names;

#[test]
fn test_reset_clears_graph() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0]), ("b", vec![1.0])]);
    db.upsert_edges(&[SimilarityEdge::new("a", "b", 1.0)]).unwrap();

    let before = db.health().unwrap();
    println!("=== TEST: reset ===");
    println!("BEFORE: {:?}", before);
    assert_eq!((before.node_count, before.edge_count), (2, 1));

    db.reset().unwrap();
    let after = db.health().unwrap();
    println!("AFTER: {:?}", after);
    assert!(after.is_healthy);
    assert_eq!((after.node_count, after.edge_count), (0, 0));
    for cf_name in cf_names::GRAPH {
        assert_eq!(db.count_keys(cf_name).unwrap(), 0, "{} not empty", cf_name);
    }
    assert!(db.neighbors("a").unwrap().is_empty());
}

#[test]
fn test_reset_empty_store() {
    let (_tmp, db) = create_temp_db();
    db.reset().unwrap();
    assert_eq!(db.clear_graph().unwrap(), 0);
}

#[test]
fn test_no_last_run_initially() {
    let (_tmp, db) = create_temp_db();
    assert!(db.last_run().unwrap().is_none());
}
