//! # Chatbox Page Command
//!
//! File: cli/src/commands/page.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `chatbox page` mounts the widget headlessly on the canonical chat document,
//! optionally submits one message and writes the resulting page to an HTML
//! file. Time is virtual: the reply is delivered by advancing a
//! `ManualScheduler` past the reply delay, so the command never sleeps.
//!
//! ## Examples
//!
//! ```bash
//! # Page after a full exchange
//! chatbox page -m "Hello" -o site
//!
//! # Page captured while the reply is still pending
//! chatbox page -m "Hello" --pending --file-name pending.html
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::core::templating::{self, PageContext};
use crate::widget::{
    ChatWidget, Document, ManualScheduler, OverlapPolicy, TextElement, WidgetSelectors,
    REPLY_DELAY,
};
use anyhow::{anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// # Page Command Arguments (`PageArgs`)
#[derive(Parser, Debug)]
pub struct PageArgs {
    /// Directory the page is written to. Created if missing.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Name of the HTML file.
    #[arg(long, default_value = "index.html")]
    pub file_name: String,

    /// Message submitted through the send trigger before rendering.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Render before the reply arrives.
    #[arg(long)]
    pub pending: bool,

    /// Page title.
    #[arg(long, default_value = "Chat")]
    pub title: String,
}

/// Builds the page HTML for `args` without touching the filesystem.
fn build_page(args: &PageArgs, selectors: &WidgetSelectors) -> Result<String> {
    let document = Document::chat_page(selectors);
    let clock = ManualScheduler::new();
    // A single submission cannot overlap, so the policy does not matter here.
    let widget = ChatWidget::mount(
        &document,
        selectors,
        Arc::new(clock.clone()),
        OverlapPolicy::default(),
    )?;

    if let Some(message) = &args.message {
        let trigger = widget
            .triggers()
            .first()
            .copied()
            .ok_or_else(|| anyhow!("The chat page has no send trigger"))?;
        widget.input().set_text(message);
        if !widget.activate(trigger).default_prevented() {
            bail!("Element {:?} is not a trigger of this widget", trigger);
        }
        if !args.pending {
            let fired = clock.advance(REPLY_DELAY);
            debug!("Advanced virtual clock by {:?}, {} callback(s) fired", REPLY_DELAY, fired);
        }
    }

    let state = widget.handler().state();
    templating::render_page(&document, &PageContext::new(&args.title, state))
}

/// # Handle Page Command (`handle_page`)
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after the page has been written; its path is printed to stdout.
///
/// ## Errors
///
/// Returns an error if the configuration is invalid, rendering fails or the
/// output cannot be written.
pub async fn handle_page(args: PageArgs) -> Result<()> {
    info!("Handling page command with args: {:?}", args);
    let cfg = config::load_config()?;
    let html = build_page(&args, &cfg.widget.selectors)?;
    let path = templating::write_page(&args.output, &args.file_name, &html)?;
    println!("{}", path.display());
    Ok(())
}
