mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    Command::cargo_bin("jelly-compress").unwrap()
}

#[test]
fn test_cli_help() {
    bin().arg("--help").assert().success();
}

#[test]
fn test_compress_help() {
    bin().args(["compress", "--help"]).assert().success();
}

#[test]
fn test_batch_help() {
    bin().args(["batch", "--help"]).assert().success();
}

#[test]
fn test_info_help() {
    bin().args(["info", "--help"]).assert().success();
}

#[test]
fn test_compress_missing_args() {
    bin().arg("compress").assert().failure();
}

#[test]
fn test_compress_nonexistent_file() {
    bin()
        .args(["compress", "nonexistent.jpg"])
        .assert()
        .failure();
}

#[test]
fn test_compress_invalid_strength() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tiny.png");
    common::write_small_png(&input);

    bin()
        .args(["compress", &input.to_string_lossy(), "--strength", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid compression strength"));
}

#[test]
fn test_compress_strength_and_preset_conflict() {
    bin()
        .args([
            "compress",
            "whatever.jpg",
            "--strength",
            "40",
            "--preset",
            "light",
        ])
        .assert()
        .failure();
}

#[test]
fn test_compress_unknown_preset() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tiny.png");
    common::write_small_png(&input);

    bin()
        .args(["compress", &input.to_string_lossy(), "--preset", "maximum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown strength preset"));
}

#[test]
fn test_compress_small_file_skip_path_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("tiny.png");
    let out_dir = temp_dir.path().join("out");
    common::write_small_png(&input);

    bin()
        .args([
            "compress",
            &input.to_string_lossy(),
            "-o",
            &out_dir.to_string_lossy(),
            "-s",
            "80",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("passed through unchanged"));

    let output = out_dir.join("tiny_jelly_image_compress.png");
    assert_eq!(fs::read(&input).unwrap(), fs::read(&output).unwrap());
}

#[test]
fn test_compress_defaults_to_input_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("photo.png");
    common::write_small_png(&input);

    bin()
        .args(["compress", &input.to_string_lossy()])
        .assert()
        .success();

    assert!(temp_dir
        .path()
        .join("photo_jelly_image_compress.png")
        .exists());
}

#[test]
fn test_compress_large_jpeg_never_grows() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("big.jpg");
    let out_dir = temp_dir.path().join("out");
    common::write_jpeg(&input, 1200, 900, 90);

    bin()
        .args([
            "compress",
            &input.to_string_lossy(),
            "-o",
            &out_dir.to_string_lossy(),
            "--preset",
            "strong",
        ])
        .assert()
        .success();

    let output = out_dir.join("big_jelly_image_compress.jpg");
    let original_size = fs::metadata(&input).unwrap().len();
    let compressed_size = fs::metadata(&output).unwrap().len();
    assert!(compressed_size <= original_size);
}

#[test]
fn test_batch_missing_args() {
    bin().arg("batch").assert().failure();
}

#[test]
fn test_batch_nonexistent_input() {
    bin()
        .args(["batch", "nonexistent", "output"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No image files found"));
}

#[test]
fn test_batch_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");

    bin()
        .args([
            "batch",
            &temp_dir.path().to_string_lossy(),
            &out_dir.to_string_lossy(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("No image files found"));
}

#[test]
fn test_batch_excludes_non_image_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("out");
    common::write_small_png(temp.child("a.png").path());
    common::write_small_png(temp.child("b.png").path());
    temp.child("notes.txt").write_str("not an image").unwrap();

    bin()
        .args([
            "batch",
            &temp.path().to_string_lossy(),
            &out.path().to_string_lossy(),
        ])
        .assert()
        .success();

    out.child("a_jelly_image_compress.png")
        .assert(predicate::path::exists());
    out.child("b_jelly_image_compress.png")
        .assert(predicate::path::exists());
    out.child("notes_jelly_image_compress.txt")
        .assert(predicate::path::missing());
}

#[test]
fn test_batch_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    common::write_small_png(&temp_dir.path().join("one.png"));
    common::write_small_png(&temp_dir.path().join("two.png"));

    let output = bin()
        .args([
            "batch",
            &temp_dir.path().to_string_lossy(),
            &out_dir.to_string_lossy(),
            "-q",
            "--json",
            "-s",
            "35",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["strength"], 35);
    assert_eq!(report["total_files"], 2);
    assert_eq!(report["succeeded"], 2);
    assert_eq!(report["failed"], 0);
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["file"], "one.png");
    assert_eq!(entries[1]["file"], "two.png");
}

#[test]
fn test_batch_isolates_per_file_failures() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    common::write_small_png(&temp_dir.path().join("a_good.png"));
    common::write_corrupt_image(&temp_dir.path().join("b_corrupt.jpg"), 150 * 1024);
    common::write_small_png(&temp_dir.path().join("c_good.png"));

    let output = bin()
        .args([
            "batch",
            &temp_dir.path().to_string_lossy(),
            &out_dir.to_string_lossy(),
            "-q",
            "--json",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to process"))
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["file"], "a_good.png");
    assert_eq!(entries[0]["ok"], true);
    assert_eq!(entries[1]["file"], "b_corrupt.jpg");
    assert_eq!(entries[1]["ok"], false);
    assert_eq!(entries[2]["file"], "c_good.png");
    assert_eq!(entries[2]["ok"], true);

    assert!(out_dir.join("a_good_jelly_image_compress.png").exists());
    assert!(!out_dir.join("b_corrupt_jelly_image_compress.jpg").exists());
    assert!(out_dir.join("c_good_jelly_image_compress.png").exists());
}

#[test]
fn test_batch_fails_when_nothing_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("out");
    common::write_corrupt_image(&temp_dir.path().join("broken.jpg"), 150 * 1024);

    bin()
        .args([
            "batch",
            &temp_dir.path().to_string_lossy(),
            &out_dir.to_string_lossy(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch compression failed"));
}

#[test]
fn test_info_missing_args() {
    bin().arg("info").assert().failure();
}

#[test]
fn test_info_nonexistent_file() {
    bin().args(["info", "nonexistent.jpg"]).assert().failure();
}

#[test]
fn test_info_shows_dimensions_and_presets() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("photo.jpg");
    common::write_jpeg(&input, 1200, 900, 90);

    bin()
        .args(["info", &input.to_string_lossy()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dimensions: 1200x900"))
        .stdout(predicate::str::contains("balanced"));
}

#[test]
fn test_info_rejects_corrupt_image() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("fake.jpg");
    common::write_corrupt_image(&input, 4096);

    bin()
        .args(["info", &input.to_string_lossy()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode"));
}
