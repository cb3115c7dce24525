//! Concurrency tests for konv.
//!
//! These tests verify that multiple processes can safely:
//! - Save conversions one after another without losing entries
//! - Save conversions simultaneously without losing entries

use assert_cmd::Command;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("konv"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn read_history(dir: &Path) -> serde_json::Value {
    let contents =
        std::fs::read_to_string(dir.join("data/history.json")).expect("Failed to read history");
    serde_json::from_str(&contents).expect("History is not valid JSON")
}

#[test]
fn test_sequential_saves_keep_every_entry() {
    let temp_dir = setup_test_dir();

    // Saves with slight delays (more realistic than thundering herd)
    for i in 0..5u64 {
        thread::sleep(Duration::from_millis(i * 5));
        cli(temp_dir.path())
            .args(["convert", &i.to_string(), "--save"])
            .assert()
            .success();
    }

    let history = read_history(temp_dir.path());
    let count = history["entries"].as_array().unwrap().len();
    assert_eq!(count, 5, "Expected 5 entries, got {}", count);
}

#[test]
fn test_parallel_saves_keep_every_entry() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dir = dir.clone();
            thread::spawn(move || {
                cli(&dir)
                    .args(["convert", &i.to_string(), "--save"])
                    .assert()
                    .success();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Writer thread panicked");
    }

    let history = read_history(temp_dir.path());
    let mut outputs: Vec<u32> = history["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["output"].as_str().unwrap().parse().unwrap())
        .collect();
    outputs.sort_unstable();
    assert_eq!(outputs, vec![0, 100, 200, 300, 400, 500, 600, 700]);
}

#[test]
fn test_readers_during_writes() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["convert", "1", "--save"])
        .assert()
        .success();

    for i in 0..3u64 {
        thread::sleep(Duration::from_millis(i * 10));
        cli(temp_dir.path())
            .args(["convert", "2", "--save"])
            .assert()
            .success();
        cli(temp_dir.path()).arg("history").assert().success();
    }

    let history = read_history(temp_dir.path());
    assert_eq!(history["entries"].as_array().unwrap().len(), 4);
}
