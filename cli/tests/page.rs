//! # Chatbox CLI Page Integration Tests
//!
//! File: cli/tests/page.rs
//! Author: Christi Mahu
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_page_writes_answered_exchange() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("site");

    isolated_cmd(dir.path())
        .args(["page", "-o", out.to_str().unwrap(), "-m", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains(">Hello</div>"));
    assert!(html.contains("This is a simulated bot response."));
    assert!(html.contains("data-state=\"answered\""));
}

#[test]
fn test_page_pending_with_custom_name_and_title() {
    let dir = tempdir().unwrap();

    isolated_cmd(dir.path())
        .args([
            "page",
            "--file-name",
            "pending.html",
            "--title",
            "Support & Sales",
            "-m",
            "Hi",
            "--pending",
        ])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("pending.html")).unwrap();
    assert!(html.contains("Processing..."));
    assert!(html.contains("<title>Support &amp; Sales</title>"));
    assert!(html.contains("data-state=\"pending\""));
}

#[test]
fn test_page_escapes_message() {
    let dir = tempdir().unwrap();

    isolated_cmd(dir.path())
        .args(["page", "-m", "<b>bold</b>"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&lt;b&gt;bold"));
}

#[test]
fn test_page_uses_configured_selectors() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".chatbox.toml"),
        "[widget.selectors]\nbot_display = \"#reply\"\ntrigger = \".send\"\n",
    )
    .unwrap();

    isolated_cmd(dir.path())
        .args(["page", "-m", "Hello"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains("<div id=\"reply\">This is a simulated bot response.</div>"));
    assert!(html.contains("<button class=\"send\">Send</button>"));
    assert!(html.contains("data-state=\"answered\""));
}

#[test]
fn test_page_rejects_invalid_selector() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".chatbox.toml"),
        "[widget.selectors]\ntrigger = \"button\"\n",
    )
    .unwrap();

    isolated_cmd(dir.path())
        .arg("page")
        .assert()
        .failure()
        .stderr(predicate::str::contains("widget.selectors.trigger"));
}
