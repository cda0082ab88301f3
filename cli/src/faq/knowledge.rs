//! # Chatbox FAQ Knowledge Base
//!
//! File: cli/src/faq/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The knowledge base is a JSON document listing intents (regex patterns plus
//! candidate responses) and fallback answers. A default one is embedded in the
//! binary; a file can be loaded instead.
//!
//! ```json
//! {
//!   "intents": [
//!     { "tag": "hours", "patterns": ["opening hours", "\\bopen\\b"], "responses": ["We open at 9."] }
//!   ],
//!   "fallbacks": ["Sorry, I didn't understand."]
//! }
//! ```
//!
//! The keys of the older Portuguese format (`intencoes`, `padroes`,
//! `respostas`) are accepted as aliases.
//!
use crate::core::error::{ChatboxError, Result};
use anyhow::{anyhow, Context};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Knowledge base compiled into the binary.
const EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../../assets/faq.json");

#[derive(Deserialize, Debug)]
struct RawKnowledgeBase {
    #[serde(alias = "intencoes", default)]
    intents: Vec<RawIntent>,
    #[serde(default)]
    fallbacks: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct RawIntent {
    #[serde(default)]
    tag: String,
    #[serde(alias = "padroes", default)]
    patterns: Vec<String>,
    #[serde(alias = "respostas", default)]
    responses: Vec<String>,
}

/// An intent with its patterns compiled.
#[derive(Debug, Clone)]
pub struct Intent {
    pub tag: String,
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
    compiled: Vec<Regex>,
}

impl Intent {
    /// Patterns compiled case-insensitively.
    pub fn regexes(&self) -> &[Regex] {
        &self.compiled
    }

    /// All patterns joined by a space, lowercased.
    pub fn pattern_text(&self) -> String {
        self.patterns.join(" ").to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub intents: Vec<Intent>,
    pub fallbacks: Vec<String>,
}

impl KnowledgeBase {
    /// # Parse Knowledge Base (`from_json`)
    ///
    /// Parses and compiles a knowledge base.
    ///
    /// ## Errors
    ///
    /// Returns an error if the JSON is malformed or an intent pattern is not a
    /// valid regular expression.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawKnowledgeBase = serde_json::from_str(json).map_err(|e| {
            anyhow!(ChatboxError::KnowledgeBase(format!("invalid JSON: {}", e)))
        })?;

        let mut intents = Vec::with_capacity(raw.intents.len());
        for raw_intent in raw.intents {
            let compiled = raw_intent
                .patterns
                .iter()
                .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    anyhow!(ChatboxError::from(e))
                        .context(format!("Intent '{}' has an invalid pattern", raw_intent.tag))
                })?;
            intents.push(Intent {
                tag: raw_intent.tag,
                patterns: raw_intent.patterns,
                responses: raw_intent.responses,
                compiled,
            });
        }

        debug!(
            "Knowledge base parsed: {} intents, {} fallbacks",
            intents.len(),
            raw.fallbacks.len()
        );
        Ok(Self {
            intents,
            fallbacks: raw.fallbacks,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading knowledge base from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to load knowledge base: {}", path.display()))
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_KNOWLEDGE_BASE).context("Embedded knowledge base is invalid")
    }

    /// Loads `path` when given, otherwise the embedded knowledge base.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_knowledge_base_is_valid() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert!(!kb.intents.is_empty());
        assert!(!kb.fallbacks.is_empty());
        assert!(kb.intents.iter().all(|i| !i.responses.is_empty()));
    }

    #[test]
    fn test_portuguese_keys_accepted() {
        let json = r#"{
            "intencoes": [
                { "tag": "horario", "padroes": ["horario"], "respostas": ["Abrimos as 9h."] }
            ],
            "fallbacks": ["Desculpe, nao entendi."]
        }"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        assert_eq!(kb.intents.len(), 1);
        assert_eq!(kb.intents[0].patterns, vec!["horario"]);
        assert_eq!(kb.intents[0].responses, vec!["Abrimos as 9h."]);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let json = r#"{ "intents": [ { "tag": "t", "patterns": ["Refund"], "responses": [] } ] }"#;
        let kb = KnowledgeBase::from_json(json).unwrap();
        assert!(kb.intents[0].regexes()[0].is_match("i want a refund"));
        assert_eq!(kb.intents[0].pattern_text(), "refund");
        assert!(kb.fallbacks.is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let json = r#"{ "intents": [ { "tag": "broken", "patterns": ["(open"], "responses": [] } ] }"#;
        let err = KnowledgeBase::from_json(json).unwrap_err();
        assert!(err.to_string().contains("broken"));
        assert!(err.downcast_ref::<ChatboxError>().is_some());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = KnowledgeBase::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("Knowledge base error: invalid JSON"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("faq.json");
        fs::write(
            &path,
            r#"{ "intents": [ { "tag": "hi", "patterns": ["hello"], "responses": ["Hi!"] } ], "fallbacks": ["?"] }"#,
        )
        .unwrap();

        let kb = KnowledgeBase::load_or_embedded(Some(&path)).unwrap();
        assert_eq!(kb.intents[0].tag, "hi");

        let missing = KnowledgeBase::load(&dir.path().join("nope.json"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read knowledge base"));
    }
}
