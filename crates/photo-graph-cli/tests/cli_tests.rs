//! Runs the `photo-graph` binary end to end with the stub model.

use std::path::Path;
use std::process::{Command, Output};

use image::{Rgb, RgbImage};
use serde_json::Value;
use tempfile::TempDir;

fn write_solid(path: &Path, color: [u8; 3]) {
    RgbImage::from_pixel(16, 16, Rgb(color))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Photos dir with two identical images and one other; returns the config path.
fn setup(tmp: &TempDir, cutoff: f64) -> std::path::PathBuf {
    let photos = tmp.path().join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    write_solid(&photos.join("a.png"), [200, 10, 10]);
    write_solid(&photos.join("b.png"), [200, 10, 10]);
    write_solid(&photos.join("c.png"), [10, 10, 200]);

    let config = format!(
        r#"
[storage]
path = "{store}"
dataset = "cli-test"
block_cache_size = 4194304

[embedding]
model = "stub"
input_height = 8
input_width = 8
dimension = 32

[source]
root = "{photos}"

[similarity]
cutoff = {cutoff}
"#,
        store = tmp.path().join("db").display(),
        photos = photos.display(),
        cutoff = cutoff,
    );
    let path = tmp.path().join("photo-graph.toml");
    std::fs::write(&path, config).unwrap();
    path
}

fn photo_graph(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_photo-graph"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_build_similar_stats() {
    let tmp = TempDir::new().unwrap();
    let config = setup(&tmp, 0.99);

    let build = photo_graph(&config, &["build"]);
    println!("=== TEST: cli build ===");
    println!("STDERR: {}", String::from_utf8_lossy(&build.stderr));
    assert_eq!(build.status.code(), Some(0));
    let report = stdout_json(&build);
    assert_eq!(report["ingested"], 3);
    assert_eq!(report["final_phase"], "PRUNED");
    assert_eq!(report["stats"]["similarity_pairs"], 1);

    let similar = photo_graph(&config, &["similar", "a.png"]);
    assert_eq!(similar.status.code(), Some(0));
    let neighbors = stdout_json(&similar);
    assert_eq!(neighbors["neighbors"][0]["identity"], "b.png");
    assert_eq!(neighbors["neighbors"].as_array().unwrap().len(), 1);

    let stats = photo_graph(&config, &["stats"]);
    assert_eq!(stats.status.code(), Some(0));
    let stats = stdout_json(&stats);
    assert_eq!(stats["node_count"], 3);
    assert_eq!(stats["edge_count"], 1);
    assert_eq!(stats["last_run"]["run_id"], report["run_id"]);
}

#[test]
fn test_cutoff_override_links_everything() {
    let tmp = TempDir::new().unwrap();
    let config = setup(&tmp, 0.99);

    let build = photo_graph(&config, &["build", "--cutoff", "-1"]);
    assert_eq!(build.status.code(), Some(0));
    assert_eq!(stdout_json(&build)["stats"]["similarity_pairs"], 3);
}

#[test]
fn test_invalid_cutoff_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let config = setup(&tmp, 1.5);

    let build = photo_graph(&config, &["build"]);
    assert_eq!(build.status.code(), Some(2));
    assert!(build.stdout.is_empty());
}

#[test]
fn test_missing_root_is_run_failure() {
    let tmp = TempDir::new().unwrap();
    let config = setup(&tmp, 0.6);

    let build = photo_graph(&config, &["build", "--root", "/nonexistent/photos"]);
    assert_eq!(build.status.code(), Some(1));
}
