//! Edge and adjacency tests for the RocksDB backend.

use photo_graph_core::{CoreError, EdgePredicate, GraphStore, SimilarityEdge};

use super::tests_node::{create_temp_db, store_nodes};

#[test]
fn test_upsert_edges_canonical_and_indexed() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("img1", vec![1.0, 0.0]), ("img2", vec![1.0, 0.0])]);

    let written = db
        .upsert_edges(&[SimilarityEdge {
            source: "img2".into(),
            target: "img1".into(),
            weight: 1.0,
        }])
        .unwrap();
    assert_eq!(written, 1);

    let edges = db.list_edges().unwrap();
    println!("=== TEST: canonical edge ===");
    println!("AFTER: {:?}", edges);
    assert_eq!(edges, vec![SimilarityEdge::new("img1", "img2", 1.0)]);
    assert_eq!(db.neighbors("img1").unwrap(), vec![("img2".to_string(), 1.0)]);
    assert_eq!(db.neighbors("img2").unwrap(), vec![("img1".to_string(), 1.0)]);
}

#[test]
fn test_reversed_pair_replaces_edge() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0]), ("b", vec![1.0])]);

    db.upsert_edges(&[SimilarityEdge::new("a", "b", 0.7)]).unwrap();
    db.upsert_edges(&[SimilarityEdge::new("b", "a", 0.9)]).unwrap();

    let edges = db.list_edges().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].weight, 0.9);
    assert_eq!(db.neighbors("a").unwrap(), vec![("b".to_string(), 0.9)]);
}

#[test]
fn test_edge_to_unknown_node_writes_nothing() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0]), ("b", vec![1.0])]);

    let err = db
        .upsert_edges(&[
            SimilarityEdge::new("a", "b", 0.9),
            SimilarityEdge::new("a", "ghost", 0.8),
        ])
        .unwrap_err();
    assert!(matches!(err, CoreError::StoreState(ref m) if m.contains("ghost")));
    assert!(db.list_edges().unwrap().is_empty());
    assert!(db.neighbors("a").unwrap().is_empty());
}

#[test]
fn test_neighbors_ordered_and_prefix_exact() {
    let (_tmp, db) = create_temp_db();
    store_nodes(
        &db,
        &[
            ("a", vec![1.0]),
            ("ab", vec![1.0]),
            ("b", vec![1.0]),
            ("c", vec![1.0]),
        ],
    );
    db.upsert_edges(&[
        SimilarityEdge::new("a", "b", 0.7),
        SimilarityEdge::new("a", "c", 0.95),
        SimilarityEdge::new("ab", "c", 0.99),
    ])
    .unwrap();

    let n = db.neighbors("a").unwrap();
    assert_eq!(n, vec![("c".to_string(), 0.95), ("b".to_string(), 0.7)]);
    assert_eq!(db.neighbors("ab").unwrap(), vec![("c".to_string(), 0.99)]);
    assert!(db.neighbors("zzz").unwrap().is_empty());
}

#[test]
fn test_prune_removes_self_loops_and_low_weights() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0]), ("b", vec![1.0]), ("c", vec![1.0])]);
    db.upsert_edges(&[
        SimilarityEdge::new("a", "a", 1.0),
        SimilarityEdge::new("a", "b", 0.6),
        SimilarityEdge::new("b", "c", 0.59),
    ])
    .unwrap();

    let removed = db
        .delete_edges_where(&EdgePredicate::degenerate(0.6))
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(db.list_edges().unwrap(), vec![SimilarityEdge::new("a", "b", 0.6)]);
    assert_eq!(db.neighbors("a").unwrap(), vec![("b".to_string(), 0.6)]);
    assert!(db.neighbors("c").unwrap().is_empty());
}

#[test]
fn test_batch_similarity_writes_exact_pairs() {
    let (_tmp, db) = create_temp_db();
    store_nodes(
        &db,
        &[
            ("img1", vec![1.0, 0.0]),
            ("img2", vec![1.0, 0.0]),
            ("img3", vec![0.0, 1.0]),
        ],
    );

    let stats = db.batch_similarity(0.6).unwrap().unwrap();
    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.similarity_pairs, 1);
    assert_eq!(db.list_edges().unwrap(), vec![SimilarityEdge::new("img1", "img2", 1.0)]);
}

#[test]
fn test_batch_similarity_dimension_mismatch_writes_nothing() {
    let (_tmp, db) = create_temp_db();
    store_nodes(&db, &[("a", vec![1.0; 4]), ("b", vec![1.0; 5])]);

    let err = db.batch_similarity(0.6).unwrap_err();
    assert!(matches!(err, CoreError::DimensionMismatch { .. }));
    assert!(db.list_edges().unwrap().is_empty());
}
