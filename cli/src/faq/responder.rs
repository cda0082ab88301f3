//! # Chatbox FAQ Responder
//!
//! File: cli/src/faq/responder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A rule-based answering bot over a `KnowledgeBase`. A question is scored
//! against every intent:
//! - +3 for each intent pattern matching the normalized question
//! - +1 for each question keyword found as a whole word in the intent's patterns
//! - +2 for each keyword bigram found in the intent's patterns
//!
//! The best intent answers if it scores at least `MIN_SCORE`. Otherwise the
//! bot falls back, echoing the keywords it detected.
//!
//! Randomness (which response, which fallback) comes from the caller's RNG so
//! answers are reproducible with a seeded generator.
//!
use super::knowledge::{Intent, KnowledgeBase};
use super::text::{content_words, most_common, normalize};
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use tracing::debug;

/// Minimum score for an intent to answer.
pub const MIN_SCORE: u32 = 2;

/// Used when the knowledge base has no fallbacks.
pub const DEFAULT_FALLBACK: &str = "Sorry, I didn't understand.";

/// Keywords considered when scoring an intent.
const SCORING_KEYWORDS: usize = 6;

/// Keywords echoed back in a fallback answer.
const ECHOED_KEYWORDS: usize = 4;

/// Bigrams placed in front of the keyword list.
const TOP_BIGRAMS: usize = 2;

/// # Extract Keywords (`extract_keywords`)
///
/// Returns the two most frequent bigrams of consecutive non-stop-words,
/// followed by the `top_k` most frequent non-stop-words (skipping any already
/// listed). Ties keep first-appearance order.
pub fn extract_keywords(text: &str, top_k: usize) -> Vec<String> {
    let words = content_words(text);

    let bigrams: Vec<String> = words
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();

    let mut keywords: Vec<String> = most_common(&bigrams)
        .into_iter()
        .take(TOP_BIGRAMS)
        .map(|(b, _)| b)
        .collect();

    for (word, _) in most_common(&words).into_iter().take(top_k) {
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(needle))) {
        Ok(re) => re.is_match(haystack),
        Err(_) => false,
    }
}

/// Scores `text` against one intent.
pub fn score_intent(text: &str, intent: &Intent) -> u32 {
    let normalized = normalize(text);
    let mut score = 0;

    score += 3 * intent
        .regexes()
        .iter()
        .filter(|re| re.is_match(&normalized))
        .count() as u32;

    let keywords = extract_keywords(text, SCORING_KEYWORDS);
    let pattern_text = intent.pattern_text();
    for keyword in &keywords {
        if contains_whole_word(&pattern_text, keyword) {
            score += 1;
        }
    }
    for keyword in keywords.iter().filter(|k| k.contains(' ')) {
        if pattern_text.contains(keyword.as_str()) {
            score += 2;
        }
    }
    score
}

/// Answers questions from a knowledge base.
#[derive(Debug, Clone)]
pub struct Responder {
    kb: KnowledgeBase,
}

impl Responder {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Highest-scoring intent with a positive score. The first intent wins ties.
    pub fn find_best_intent(&self, text: &str) -> Option<(&Intent, u32)> {
        let mut best: Option<(&Intent, u32)> = None;
        for intent in &self.kb.intents {
            let score = score_intent(text, intent);
            debug!("Intent '{}' scored {}", intent.tag, score);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((intent, score));
            }
        }
        best
    }

    fn fallback<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.kb
            .fallbacks
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_FALLBACK)
            .to_string()
    }

    /// # Respond (`respond`)
    ///
    /// - Blank question: a random fallback.
    /// - Best intent scores at least `MIN_SCORE`: one of its responses.
    /// - Otherwise: a random fallback followed by the detected keywords, if any.
    pub fn respond<R: Rng + ?Sized>(&self, question: &str, rng: &mut R) -> String {
        if question.trim().is_empty() {
            return self.fallback(rng);
        }

        if let Some((intent, score)) = self.find_best_intent(question) {
            if score >= MIN_SCORE {
                debug!("Answering with intent '{}' (score {})", intent.tag, score);
                return match intent.responses.choose(rng) {
                    Some(response) => response.clone(),
                    None => self.fallback(rng),
                };
            }
        }

        let keywords = extract_keywords(question, ECHOED_KEYWORDS);
        let fallback = self.fallback(rng);
        if keywords.is_empty() {
            fallback
        } else {
            format!("{} (Detected keywords: {})", fallback, keywords.join(", "))
        }
    }
}
