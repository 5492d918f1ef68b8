//! Full runs over real image files with the deterministic stub model.

use std::path::Path;
use std::sync::Arc;

use image::{Rgb, RgbImage};
use photo_graph_core::config::IdentityMode;
use photo_graph_core::stubs::{InMemoryGraphStore, StubEmbeddingModel};
use photo_graph_core::{CoreError, GraphStore, InputShape, PipelineDriver, PipelineOptions};
use photo_graph_embeddings::{DirectoryImageSource, ImageProcessor};
use tempfile::TempDir;

fn write_solid(path: &Path, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(32, 24, Rgb(color))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn source(root: &Path, identity: IdentityMode) -> DirectoryImageSource {
    DirectoryImageSource::new(
        root,
        &["png".to_string(), "jpg".to_string()],
        identity,
        ImageProcessor::new(8, 8, true),
    )
}

fn stub() -> Arc<StubEmbeddingModel> {
    Arc::new(StubEmbeddingModel::new(InputShape::new(8, 8, 3), 32))
}

#[tokio::test]
async fn test_identical_files_link() {
    let dir = TempDir::new().unwrap();
    write_solid(&dir.path().join("a.png"), [200, 10, 10]);
    write_solid(&dir.path().join("copy_of_a.png"), [200, 10, 10]);
    write_solid(&dir.path().join("other.png"), [10, 10, 200]);

    let store = Arc::new(InMemoryGraphStore::new());
    let options = PipelineOptions {
        cutoff: 0.99,
        ..PipelineOptions::default()
    };
    let report = PipelineDriver::new(
        stub(),
        store.clone(),
        Arc::new(source(dir.path(), IdentityMode::FileName)),
        options,
    )
    .unwrap()
    .run()
    .await
    .unwrap();

    println!("=== TEST: identical files ===");
    println!("AFTER: {:?}", store.list_edges().unwrap());

    assert_eq!(report.ingested, 3);
    let neighbors = store.neighbors("a.png").unwrap();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].0, "copy_of_a.png");
    assert!((neighbors[0].1 - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_corrupt_file_skipped() {
    let dir = TempDir::new().unwrap();
    write_solid(&dir.path().join("good.png"), [1, 2, 3]);
    std::fs::write(dir.path().join("broken.jpg"), b"\xff\xd8\xff\xe0 truncated").unwrap();

    let store = Arc::new(InMemoryGraphStore::new());
    let report = PipelineDriver::new(
        stub(),
        store.clone(),
        Arc::new(source(dir.path(), IdentityMode::FileName)),
        PipelineOptions::default(),
    )
    .unwrap()
    .run()
    .await
    .unwrap();

    assert_eq!(report.ingested, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].identity, "broken.jpg");
}

#[tokio::test]
async fn test_collision_aborts_before_reset() {
    let dir = TempDir::new().unwrap();
    write_solid(&dir.path().join("2019/img.png"), [1, 2, 3]);
    write_solid(&dir.path().join("2020/img.png"), [4, 5, 6]);

    let store = Arc::new(InMemoryGraphStore::new());
    store
        .upsert_node(&photo_graph_core::PhotoNode::new("previous", vec![1.0]))
        .unwrap();

    let err = PipelineDriver::new(
        stub(),
        store.clone(),
        Arc::new(source(dir.path(), IdentityMode::FileName)),
        PipelineOptions::default(),
    )
    .unwrap()
    .run()
    .await
    .unwrap_err();

    assert!(matches!(err, CoreError::IdentityCollision { .. }));
    assert_eq!(store.list_nodes().unwrap().len(), 1);

    // Relative-path identities keep both files.
    let report = PipelineDriver::new(
        stub(),
        store.clone(),
        Arc::new(source(dir.path(), IdentityMode::RelativePath)),
        PipelineOptions::default(),
    )
    .unwrap()
    .run()
    .await
    .unwrap();
    assert_eq!(report.ingested, 2);
    let mut ids: Vec<String> = store
        .list_nodes()
        .unwrap()
        .into_iter()
        .map(|n| n.identity)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["2019/img.png", "2020/img.png"]);
}

#[tokio::test]
async fn test_native_channels_rejected_by_shape() {
    let dir = TempDir::new().unwrap();
    let gray_path = dir.path().join("gray.png");
    image::GrayImage::from_pixel(16, 16, image::Luma([90]))
        .save_with_format(&gray_path, image::ImageFormat::Png)
        .unwrap();
    write_solid(&dir.path().join("color.png"), [9, 9, 9]);

    let src = DirectoryImageSource::new(
        dir.path(),
        &["png".to_string()],
        IdentityMode::FileName,
        ImageProcessor::new(8, 8, false),
    );
    let store = Arc::new(InMemoryGraphStore::new());
    let report = PipelineDriver::new(stub(), store, Arc::new(src), PipelineOptions::default())
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(report.ingested, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].identity, "gray.png");
    assert!(report.skipped[0].reason.contains("8x8x1"));
}
