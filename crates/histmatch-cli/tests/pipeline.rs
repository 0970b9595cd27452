//! End-to-end ranking tests using synthetic images.
//!
//! Fixture images are built with the test-support grid builders and written
//! to a temporary directory before running the binary.

#![allow(clippy::unwrap_used, clippy::float_cmp, deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use histmatch_core::PixelGrid;
use histmatch_test_support::SyntheticGridBuilder;
use serde_json::Value;

fn histmatch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("histmatch").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).current_dir(home);
    cmd
}

/// Create a temporary directory with synthetic test images.
fn create_test_images(images: Vec<(&str, PixelGrid)>) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    for (name, grid) in images {
        grid.pixels().save(temp_dir.path().join(name)).unwrap();
    }
    temp_dir
}

fn run_json(cmd: &mut Command) -> Vec<Value> {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    value.as_array().unwrap().clone()
}

fn file_name(value: &Value) -> &str {
    Path::new(value["path"].as_str().unwrap())
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
}

/// Query plus three candidates at known angular distances.
fn ranking_library() -> tempfile::TempDir {
    create_test_images(vec![
        ("query.png", SyntheticGridBuilder::uniform(8, 8, [200, 30, 30])),
        ("same.png", SyntheticGridBuilder::uniform(8, 8, [200, 30, 30])),
        (
            "half.png",
            SyntheticGridBuilder::split(8, 8, [200, 30, 30], [190, 30, 30]),
        ),
        ("far.png", SyntheticGridBuilder::uniform(8, 8, [20, 200, 90])),
    ])
}

fn candidates(dir: &Path) -> Vec<PathBuf> {
    ["far.png", "half.png", "same.png"]
        .iter()
        .map(|name| dir.join(name))
        .collect()
}

// === Ranking ===

#[test]
fn test_ranks_by_ascending_score() {
    let dir = ranking_library();

    let results = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json"])
            .arg(dir.path().join("query.png"))
            .args(candidates(dir.path())),
    );

    let names: Vec<_> = results.iter().map(file_name).collect();
    assert_eq!(names, vec!["same.png", "half.png", "far.png"]);

    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert_eq!(scores[0], 0.0);
    // Red channel at 45 degrees, green and blue identical
    assert!((scores[1] - 15.0).abs() < 1e-9, "half score {}", scores[1]);
    // No shared bins in any channel
    assert!((scores[2] - 90.0).abs() < 1e-9, "far score {}", scores[2]);
}

#[test]
fn test_top_k_truncates() {
    let dir = ranking_library();

    let results = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json", "-k", "1"])
            .arg(dir.path().join("query.png"))
            .args(candidates(dir.path())),
    );

    assert_eq!(results.len(), 1);
    assert_eq!(file_name(&results[0]), "same.png");
}

#[test]
fn test_top_k_larger_than_pool_returns_all() {
    let dir = ranking_library();

    let results = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json", "-k", "50"])
            .arg(dir.path().join("query.png"))
            .args(candidates(dir.path())),
    );

    assert_eq!(results.len(), 3);
}

#[test]
fn test_directory_candidates_include_query_itself() {
    let dir = ranking_library();

    let results = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json"])
            .arg(dir.path().join("query.png"))
            .arg(dir.path()),
    );

    assert_eq!(results.len(), 4);
    // Tied scores keep sorted directory order
    assert_eq!(file_name(&results[0]), "query.png");
    assert_eq!(file_name(&results[1]), "same.png");
    assert_eq!(results[1]["score"], 0.0);
}

#[test]
fn test_recursive_candidates() {
    let dir = ranking_library();
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    SyntheticGridBuilder::uniform(4, 4, [200, 30, 30])
        .pixels()
        .save(nested.join("deep.png"))
        .unwrap();

    let flat = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json"])
            .arg(dir.path().join("query.png"))
            .arg(&nested),
    );
    assert_eq!(flat.len(), 1);

    let shallow = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json"])
            .arg(dir.path().join("query.png"))
            .arg(dir.path()),
    );
    assert_eq!(shallow.len(), 4);

    let deep = run_json(
        histmatch(dir.path())
            .args(["match", "--format", "json", "-r"])
            .arg(dir.path().join("query.png"))
            .arg(dir.path()),
    );
    assert_eq!(deep.len(), 5);
}

// === Statistics ===

#[test]
fn test_stats_constant_image() {
    let dir = create_test_images(vec![(
        "flat.png",
        SyntheticGridBuilder::uniform(5, 3, [7, 128, 250]),
    )]);

    let results = run_json(
        histmatch(dir.path())
            .args(["stats", "--format", "json"])
            .arg(dir.path().join("flat.png")),
    );

    let profile = &results[0];
    assert_eq!(profile["width"], 5);
    assert_eq!(profile["height"], 3);
    for (channel, value) in [("red", 7), ("green", 128), ("blue", 250)] {
        let stats = &profile[channel];
        assert_eq!(stats["min"], value);
        assert_eq!(stats["max"], value);
        assert_eq!(stats["median"], value);
        assert_eq!(stats["mean"].as_f64().unwrap(), f64::from(value));
        assert_eq!(stats["std_dev"].as_f64().unwrap(), 0.0);
    }
}

#[test]
fn test_stats_median_rule_flag() {
    // Red samples {10, 20}
    let dir = create_test_images(vec![(
        "pair.png",
        SyntheticGridBuilder::split(2, 1, [10, 0, 0], [20, 0, 0]),
    )]);
    let path = dir.path().join("pair.png");

    let legacy = run_json(
        histmatch(dir.path())
            .args(["stats", "--format", "json"])
            .arg(&path),
    );
    let exact = run_json(
        histmatch(dir.path())
            .args(["stats", "--format", "json", "--median-rule", "exact"])
            .arg(&path),
    );

    assert_eq!(legacy[0]["red"]["median"], 10);
    assert_eq!(exact[0]["red"]["median"], 15);
    assert_eq!(legacy[0]["red"]["mean"].as_f64().unwrap(), 15.0);
    assert_eq!(legacy[0]["red"]["std_dev"].as_f64().unwrap(), 5.0);
}
