//! # Chatbox Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Aggregates the top-level commands of the `chatbox` CLI. Each command
//! defines its own arguments struct and an async handler called from
//! `main.rs`.
//!
//! ## Command Groups
//!
//! - `chat`: interactive terminal session with the chat widget
//! - `page`: headless render of the widget to an HTML page
//! - `faq`: rule-based FAQ bot (`ask`, `summarize`)
//!

/// Interactive chat session over stdin/stdout.
pub mod chat;
/// Rule-based FAQ bot. Includes the `ask` and `summarize` subcommands.
pub mod faq;
/// Static HTML rendering of the widget.
pub mod page;
