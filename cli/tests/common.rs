//! # Chatbox CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and runs the compiled `chatbox` binary through
//! `assert_cmd`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get Chatbox Command (`chatbox_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `chatbox` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn chatbox_cmd() -> Command {
    Command::cargo_bin("chatbox").expect("Failed to find chatbox binary for testing")
}

/// # Get Isolated Chatbox Command (`isolated_cmd`)
///
/// Like `chatbox_cmd`, but runs inside `dir` with `HOME` and `XDG_CONFIG_HOME`
/// pointing there too, so neither a user nor a project configuration file of
/// the machine running the tests is picked up.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = chatbox_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}
