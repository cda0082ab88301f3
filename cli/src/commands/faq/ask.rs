//! # Chatbox FAQ Ask Command
//!
//! File: cli/src/commands/faq/ask.rs
//! Author: Christi Mahu
//!
//! Answers one question with the rule-based `Responder`. The knowledge base
//! comes from `--kb`, then `faq.knowledge_base` in the configuration, then
//! the one embedded in the binary.
//!
use crate::core::config;
use crate::core::error::Result;
use crate::faq::{KnowledgeBase, Responder};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # FAQ Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question. Several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// JSON knowledge base to answer from.
    #[arg(long)]
    pub kb: Option<PathBuf>,

    /// Seed for choosing among equivalent responses, for reproducible answers.
    #[arg(long)]
    pub seed: Option<u64>,
}

fn answer(question: &str, kb_path: Option<&Path>, seed: Option<u64>) -> Result<String> {
    let responder = Responder::new(KnowledgeBase::load_or_embedded(kb_path)?);
    let kb = responder.knowledge_base();
    debug!(
        "Knowledge base has {} intent(s) and {} fallback(s)",
        kb.intents.len(),
        kb.fallbacks.len()
    );
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    Ok(responder.respond(question, &mut rng))
}

/// # Handle Ask (`handle_ask`)
///
/// ## Errors
///
/// Returns an error if the configuration or the knowledge base cannot be loaded.
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    info!("Handling faq ask command with args: {:?}", args);
    let kb_path = match args.kb {
        Some(path) => Some(path),
        None => config::load_config()?.faq.knowledge_base.map(PathBuf::from),
    };
    let question = args.question.join(" ");
    println!("{}", answer(&question, kb_path.as_deref(), args.seed)?);
    Ok(())
}
