//! # Chatbox FAQ Summarize Command
//!
//! File: cli/src/commands/faq/summarize.rs
//! Author: Christi Mahu
//!
//! Prints an extractive summary of a text given inline, read from `--file`,
//! or read from standard input when neither is given.
//!
use crate::core::config;
use crate::core::error::{ChatboxError, Result};
use crate::faq;
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// # FAQ Summarize Arguments (`SummarizeArgs`)
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Text to summarize.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from this file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Number of sentences to keep. Defaults to `faq.summary_sentences`.
    #[arg(short = 'n', long)]
    pub sentences: Option<usize>,
}

fn read_source(args: &SummarizeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

fn resolve_sentences(flag: Option<usize>, configured: usize) -> Result<usize> {
    match flag {
        Some(0) => Err(ChatboxError::Config(
            "--sentences must be at least 1".to_string(),
        )
        .into()),
        Some(n) => Ok(n),
        None => Ok(configured),
    }
}

/// # Handle Summarize (`handle_summarize`)
///
/// ## Errors
///
/// Returns an error if the text cannot be read or `--sentences` is 0.
pub async fn handle_summarize(args: SummarizeArgs) -> Result<()> {
    info!("Handling faq summarize command with args: {:?}", args);
    let configured = config::load_config()?.faq.summary_sentences;
    let sentences = resolve_sentences(args.sentences, configured)?;
    let text = read_source(&args)?;
    println!("{}", faq::summarize(&text, sentences));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_sentences() {
        assert_eq!(resolve_sentences(None, 2).unwrap(), 2);
        assert_eq!(resolve_sentences(Some(4), 2).unwrap(), 4);
        assert!(resolve_sentences(Some(0), 2).is_err());
    }

    #[test]
    fn test_read_source_prefers_inline_text() -> Result<()> {
        let args = SummarizeArgs::try_parse_from(["summarize", "Inline."])?;
        assert_eq!(read_source(&args)?, "Inline.");
        Ok(())
    }

    #[test]
    fn test_read_source_from_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, "From a file.")?;
        let args = SummarizeArgs::try_parse_from(["summarize", "--file", path.to_str().unwrap()])?;
        assert_eq!(read_source(&args)?, "From a file.");
        Ok(())
    }

    #[test]
    fn test_text_and_file_conflict() {
        assert!(SummarizeArgs::try_parse_from(["summarize", "Text.", "--file", "x.txt"]).is_err());
    }
}
