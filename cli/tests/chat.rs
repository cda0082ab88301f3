//! # Chatbox CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//! Author: Christi Mahu
//!
//! Runs `chatbox chat` with scripted stdin. These tests wait for the real
//! reply delay.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_chat_single_message() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .arg("chat")
        .write_stdin("Hello\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("you> Hello")
                .and(predicate::str::contains("bot> Processing..."))
                .and(predicate::str::contains("bot> This is a simulated bot response.")),
        );
}

#[test]
fn test_chat_empty_input_prints_nothing() {
    let dir = tempdir().unwrap();
    isolated_cmd(dir.path())
        .arg("chat")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_chat_reads_overlap_from_project_config() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".chatbox.toml"),
        "[widget]\noverlap = \"cancel-previous\"\n",
    )
    .unwrap();

    let output = isolated_cmd(dir.path())
        .arg("chat")
        .write_stdin("one\ntwo\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("This is a simulated bot response.").count(), 1);
    assert!(stdout.trim_end().ends_with("bot> This is a simulated bot response."));
}

#[test]
fn test_chat_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".chatbox.toml"), "[widget]\nunknown = 1\n").unwrap();

    isolated_cmd(dir.path())
        .arg("chat")
        .write_stdin("Hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
