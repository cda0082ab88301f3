//! # Chatbox Page Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Renders a chat `Document` into a standalone HTML page using the Tera
//! templating engine. The page template is compiled into the binary.
//!
//! The template receives the document as a list of element snapshots and
//! renders each one itself. Autoescaping is always on, so element text,
//! attributes and the title can never turn into markup.
//!
//! ## Examples
//!
//! ```rust
//! let html = templating::render_page(&document, &PageContext::new("Chat", BotState::Answered))?;
//! let path = templating::write_page(&output_dir, "index.html", &html)?;
//! ```
//!
use crate::core::error::{ChatboxError, Result};
use crate::widget::{BotState, Document};
use anyhow::{anyhow, Context};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info};

const PAGE_TEMPLATE: &str = include_str!("../../templates/chat.html.tera");

/// Values of the page outside the document body.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub title: String,
    pub state: String,
    pub version: String,
    pub rendered_at: String,
}

impl PageContext {
    pub fn new(title: &str, state: BotState) -> Self {
        Self {
            title: title.to_string(),
            state: format!("{:?}", state).to_lowercase(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            rendered_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// # Render Page (`render_page`)
///
/// ## Arguments
///
/// * `document`: The document whose elements form the page body.
/// * `page`: Title and metadata.
///
/// ## Returns
///
/// * `Result<String>`: The rendered HTML.
///
/// ## Errors
///
/// Returns `ChatboxError::Template` if Tera fails to build a context or render.
pub fn render_page(document: &Document, page: &PageContext) -> Result<String> {
    let mut context = tera::Context::from_serialize(page).map_err(|e| {
        anyhow!(ChatboxError::Template { source: e })
            .context("Failed to create Tera context for the chat page")
    })?;
    context.insert("elements", &document.snapshot());

    debug!("Rendering chat page with {} elements", document.len());
    Tera::one_off(PAGE_TEMPLATE, &context, true).map_err(|e| {
        anyhow!(ChatboxError::Template { source: e }).context("Tera rendering failed for the chat page")
    })
}

/// Writes `html` to `dir/file_name`, creating `dir` if needed.
pub fn write_page(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, html)
        .with_context(|| format!("Failed to write page '{}'", path.display()))?;
    info!("Wrote chat page to '{}'", path.display());
    Ok(path)
}
