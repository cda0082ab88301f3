//! # Chatbox Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point of the `chatbox` CLI. It parses arguments with Clap, sets up
//! logging from the verbosity flag and routes to the command handlers.
//!
//! ## Architecture
//!
//! - `widget`: the chat widget (document model, form handler, schedulers)
//! - `faq`: the rule-based FAQ bot and summarizer
//! - `core`: errors, configuration and page templating
//! - `commands`: one module per top-level command
//!
//! ## Examples
//!
//! ```bash
//! # Chat in the terminal
//! chatbox chat
//!
//! # Render the widget after one exchange, with debug logs
//! chatbox -vv page -m "Hello"
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod core;
mod faq;
mod widget;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "chatbox",
    about = "A minimal chat widget with a simulated bot, plus a rule-based FAQ bot",
    long_about = "Chat with a simulated bot in the terminal, render the chat widget to HTML,\n\
                  or ask questions of a rule-based FAQ bot.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Chat with the simulated bot over stdin/stdout.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Render the chat widget to an HTML page.
    #[command(alias = "p")]
    Page(commands::page::PageArgs),
    /// Ask the rule-based FAQ bot or summarize text.
    #[command(alias = "f")]
    Faq(commands::faq::FaqArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Page(args) => commands::page::handle_page(args).await,
        Commands::Faq(args) => commands::faq::handle_faq(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
