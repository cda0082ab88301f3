//! # Chatbox Text Utilities
//!
//! File: cli/src/faq/text.rs
//! Author: Christi Mahu
//!
//! Normalization, tokenization and the stop-word list shared by the FAQ
//! responder and the summarizer.
//!
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s\.,\?!]").expect("static regex is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z0-9]+\b").expect("static regex is valid"));

/// Words ignored by keyword extraction and sentence scoring: English, then
/// Portuguese. Entries are in normalized form, without diacritics.
pub const STOPWORDS: &[&str] = &[
    // English
    "a", "an", "the", "and", "or", "but", "of", "to", "in", "on", "at", "by", "for", "with",
    "from", "as", "is", "are", "was", "were", "be", "been", "am", "do", "does", "did", "i", "you",
    "me", "my", "your", "we", "our", "it", "its", "this", "that", "these", "those", "there", "if",
    "so", "can", "could", "will", "would", "should", "have", "has", "had", "what", "which", "who",
    "how", "where", "when", "why", "about", "also", "not", "no", "any", "some", "please",
    // Portuguese
    "e", "o", "os", "um", "uma", "de", "da", "dos", "das", "em", "na", "nos", "nas", "por",
    "para", "com", "sem", "ou", "que", "como", "onde", "qual", "quais", "sao", "eu", "voce",
    "minha", "meu", "se", "este", "esta", "isso", "ao", "pelo", "pela", "pelos", "pelas",
    "tambem", "tem", "temos", "pode", "poder", "porque",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// # Normalize (`normalize`)
///
/// Lowercases and trims `text`, strips diacritics (canonical decomposition,
/// then every combining mark is dropped), turns every character
/// other than `a-z`, digits, whitespace and `. , ? !` into a space, then
/// collapses whitespace runs into a single space.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let cleaned = NON_TEXT.replace_all(&folded, " ");
    WHITESPACE.replace_all(&cleaned, " ").into_owned()
}

/// Words of already-normalized text.
pub fn tokenize_words(text: &str) -> Vec<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Normalizes `text` and returns its words minus stop-words.
pub fn content_words(text: &str) -> Vec<String> {
    tokenize_words(&normalize(text))
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect()
}

/// # Split Sentences (`tokenize_sentences`)
///
/// Splits after `.`, `?` or `!` when followed by whitespace. Parts are trimmed
/// and empty parts dropped. Terminators stay with their sentence.
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '?' | '!') {
            continue;
        }
        if let Some(&(next_i, next)) = chars.peek() {
            if next.is_whitespace() {
                sentences.push(&text[start..next_i]);
                start = next_i;
            }
        }
    }
    sentences.push(&text[start..]);
    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts occurrences, ordered by count (descending), ties by first appearance.
pub fn most_common(items: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.clone(), 1)),
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
