//! # Chatbox FAQ Bot
//!
//! File: cli/src/faq/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small rule-based bot that answers questions from a JSON knowledge base,
//! plus an extractive summarizer. It stands apart from the chat widget, whose
//! reply stays a fixed string.
//!
//! ## Architecture
//!
//! - `text.rs`: normalization, tokenization and stop-words
//! - `knowledge.rs`: knowledge base loading and pattern compilation
//! - `responder.rs`: keyword extraction, intent scoring and answering
//! - `summarize.rs`: sentence scoring and selection
//!
pub mod knowledge;
pub mod responder;
pub mod summarize;
pub mod text;

pub use knowledge::KnowledgeBase;
pub use responder::Responder;
pub use summarize::summarize;
