//! Integration tests for the fanlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Console output and level gating
//! - File destinations and directory creation
//! - Rotation into gzip archives
//! - Config file loading

use assert_cmd::Command;
use flate2::read::GzDecoder;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create an isolated working directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI with the default config location isolated
fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fanlog"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

fn gunzip(path: &Path) -> String {
    let mut decoder = GzDecoder::new(File::open(path).expect("Failed to open archive"));
    let mut out = String::new();
    decoder
        .read_to_string(&mut out)
        .expect("Failed to decompress archive");
    out
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Write leveled log lines"));
}

#[test]
fn test_message_printed_to_console() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["--prefix", "deploy", "release %s done", "v1.2"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[\d{2} [A-Z][a-z]{2} \d{4} \d{2}:\d{2}:\d{2}\] info deploy release v1.2 done\n$",
        )
        .unwrap());
}

#[test]
fn test_below_threshold_is_silent() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["--level", "30", "--severity", "info", "hidden"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    cli(&temp_dir)
        .args(["--level", "30", "--severity", "warning", "shown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning fanlog shown"));
}

#[test]
fn test_file_destination_creates_directories() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("a/b/c.log");

    cli(&temp_dir)
        .arg("--no-console")
        .arg("--file")
        .arg(&log_path)
        .arg("to the file")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp_dir.path().join("a/b").is_dir());
    let content = fs::read_to_string(&log_path).expect("Failed to read log");
    assert!(content.ends_with("info fanlog to the file\n"));
}

#[test]
fn test_file_lines_append_across_runs() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("app.log");

    for i in 0..3 {
        cli(&temp_dir)
            .arg("--no-console")
            .arg("--file")
            .arg(&log_path)
            .arg(format!("run {}", i))
            .assert()
            .success();
    }

    let content = fs::read_to_string(&log_path).expect("Failed to read log");
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_stdin_lines_are_logged() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["--severity", "error", "--prefix", "pipe"])
        .write_stdin("first %s\nsecond\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error pipe first %s\n"))
        .stdout(predicate::str::contains("error pipe second\n"));
}

#[test]
fn test_rotation_writes_archive() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("rot.log");

    cli(&temp_dir)
        .arg("--no-console")
        .arg("--file")
        .arg(&log_path)
        .args(["--rotate", "50"])
        .arg("this message is long enough to push the file past fifty bytes")
        .assert()
        .success();

    let archive = temp_dir.path().join("rot.log.1.gz");
    assert!(archive.exists());
    assert!(gunzip(&archive).ends_with("past fifty bytes\n"));
    assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
}

#[test]
fn test_config_file_is_applied() {
    let temp_dir = setup_test_dir();
    let log_path = temp_dir.path().join("from_config.log");
    let config_path = temp_dir.path().join("fanlog.toml");
    fs::write(
        &config_path,
        format!(
            "level = 40\nconsole = false\nfiles = [{:?}]\n",
            log_path.display().to_string()
        ),
    )
    .expect("Failed to write config");

    cli(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .args(["--severity", "warning", "dropped"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    cli(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .args(["--severity", "error", "kept"])
        .assert()
        .success();

    let content = fs::read_to_string(&log_path).expect("Failed to read log");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("error fanlog kept"));
}

#[test]
fn test_default_config_location() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("config/fanlog");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "console = false\n").unwrap();

    cli(&temp_dir)
        .arg("quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    cli(&temp_dir)
        .args(["--console", "loud"])
        .assert()
        .success()
        .stdout(predicate::str::contains("loud"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "files = [").unwrap();

    cli(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .arg("msg")
        .assert()
        .failure();
}

#[test]
fn test_unknown_severity_rejected() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["--severity", "shout", "msg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shout"));
}

#[test]
fn test_unwritable_file_fails() {
    let temp_dir = setup_test_dir();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    cli(&temp_dir)
        .arg("--file")
        .arg(blocker.join("app.log"))
        .arg("msg")
        .assert()
        .failure();
}
