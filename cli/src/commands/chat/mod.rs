//! # Chatbox Chat Command
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `chatbox chat` runs the chat widget in the terminal. Standard input plays
//! the part of the input control: every line is submitted through the send
//! trigger, and the transcript on standard output mirrors the user and bot
//! message regions.
//!
//! ## Examples
//!
//! ```bash
//! # Interactive session
//! chatbox chat
//!
//! # Scripted session, cancelling replies superseded by a newer message
//! printf 'Hello\nAnyone there?\n' | chatbox chat --overlap cancel-previous
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::widget::{ChatWidget, Document, OverlapPolicy, TokioScheduler};
use anyhow::anyhow;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

/// Drives a mounted widget from a line reader.
pub mod session;

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// What a new message does to a reply that is still pending.
    /// Overrides `widget.overlap` from the configuration file.
    #[arg(long, value_enum)]
    pub overlap: Option<OverlapPolicy>,

    /// Prefix every transcript line with the local time.
    #[arg(long)]
    pub timestamps: bool,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads the configuration, mounts the widget on the canonical chat page with
/// a tokio-backed scheduler and runs a session over standard input.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` once input has ended and every pending reply has been shown.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);
    let cfg = config::load_config()?;
    let policy = args.overlap.unwrap_or(cfg.widget.overlap);

    let selectors = &cfg.widget.selectors;
    let document = Document::chat_page(selectors);
    let widget = ChatWidget::mount(
        &document,
        selectors,
        Arc::new(TokioScheduler::new()),
        policy,
    )?;
    let trigger = widget
        .triggers()
        .first()
        .copied()
        .ok_or_else(|| anyhow!("The chat page has no send trigger"))?;

    if std::io::stdin().is_terminal() {
        eprintln!("Type a message and press Enter. Ctrl+D to quit.");
    }

    let options = session::SessionOptions {
        timestamps: args.timestamps,
    };
    let reader = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let summary = session::run_session(&widget, trigger, reader, &mut stdout, &options).await?;

    info!(
        "Chat session ended after {} message(s) with overlap policy {:?}",
        summary.submitted,
        widget.handler().policy()
    );
    Ok(())
}
