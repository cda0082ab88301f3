//! # Chatbox FAQ Command Group
//!
//! File: cli/src/commands/faq/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Routes `chatbox faq <subcommand>` to the rule-based FAQ bot:
//! - `ask`: answer a question from a JSON knowledge base
//! - `summarize`: extractive summary of a text
//!
//! ## Examples
//!
//! ```bash
//! chatbox faq ask "What are your opening hours?"
//! chatbox faq ask --kb ./support.json --seed 1 "refund please"
//! chatbox faq summarize --file notes.txt -n 3
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod ask;
mod summarize;

/// # FAQ Command Group Arguments (`FaqArgs`)
#[derive(Parser, Debug)]
pub struct FaqArgs {
    #[command(subcommand)]
    command: FaqCommand,
}

#[derive(Subcommand, Debug)]
enum FaqCommand {
    /// Answer a question from the knowledge base.
    Ask(ask::AskArgs),
    /// Keep the most representative sentences of a text.
    Summarize(summarize::SummarizeArgs),
}

/// Dispatches to the selected FAQ subcommand.
pub async fn handle_faq(args: FaqArgs) -> Result<()> {
    match args.command {
        FaqCommand::Ask(args) => ask::handle_ask(args).await?,
        FaqCommand::Summarize(args) => summarize::handle_summarize(args).await?,
    }
    Ok(())
}
