//! # Chatbox Extractive Summarizer
//!
//! File: cli/src/faq/summarize.rs
//! Author: Christi Mahu
//!
//! Keeps the sentences whose words are most frequent across the whole text.
//! A sentence scores the sum of its word frequencies divided by the square
//! root of its word count, so long sentences are not favoured just for being
//! long. Selected sentences are emitted in their original order.
//!
use super::text::{content_words, most_common, tokenize_sentences};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// # Summarize (`summarize`)
///
/// ## Arguments
///
/// * `text`: The text to summarize.
/// * `max_sentences`: How many sentences to keep.
///
/// ## Returns
///
/// * `String`: `text` unchanged if it has at most `max_sentences` sentences;
///   the leading sentences if it has no content words; otherwise the
///   best-scoring sentences in original order, joined by a space.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = tokenize_sentences(text);
    if sentences.len() <= max_sentences {
        return text.to_string();
    }

    let words = content_words(text);
    if words.is_empty() {
        return sentences[..max_sentences].join(" ");
    }

    let freq: HashMap<String, usize> = most_common(&words).into_iter().collect();

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let sentence_words = content_words(sentence);
            if sentence_words.is_empty() {
                return (i, 0.0);
            }
            let total: usize = sentence_words
                .iter()
                .map(|w| freq.get(w).copied().unwrap_or(0))
                .sum();
            (i, total as f64 / (sentence_words.len() as f64).sqrt())
        })
        .collect();

    // Stable: equal scores keep document order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    debug!("Sentence scores (best first): {:?}", scored);

    let keep: HashSet<&str> = scored
        .iter()
        .take(max_sentences)
        .map(|(i, _)| sentences[*i].as_str())
        .collect();

    sentences
        .iter()
        .filter(|s| keep.contains(s.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_returned_unchanged() {
        let text = "  One sentence.   Two sentences!  ";
        assert_eq!(summarize(text, 2), text);
    }

    #[test]
    fn test_keeps_most_representative_in_order() {
        let text = "Rust makes memory safety practical. \
                    The weather was nice yesterday. \
                    Memory safety in Rust comes from ownership. \
                    Lunch was pasta.";
        assert_eq!(
            summarize(text, 2),
            "Rust makes memory safety practical. Memory safety in Rust comes from ownership."
        );
    }

    #[test]
    fn test_single_sentence_summary() {
        let text = "Cats sleep. Cats purr and cats play. Dogs bark.";
        assert_eq!(summarize(text, 1), "Cats purr and cats play.");
    }

    #[test]
    fn test_stopword_only_text_keeps_leading_sentences() {
        let text = "It is. So it was. What is it?";
        assert_eq!(summarize(text, 2), "It is. So it was.");
    }
}
