//! Tokenization for the vocabulary analyses.
//!
//! Political-programme prose is compared on content words only: everything
//! outside the letter classes (ASCII letters plus German umlauts and ß) is
//! treated as a separator, tokens are lowercased, and German function words
//! are removed using the `stop-words` crate's list. Numbers are deliberately
//! not tokens — a year or section number says nothing about vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

static RE_NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-ZäöüÄÖÜß]").unwrap());

static GERMAN_STOP_WORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    get(LANGUAGE::German)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
});

/// Tokenize a text into lowercased content words.
///
/// Non-letter characters become separators, tokens are lowercased, and
/// German stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    RE_NON_LETTER
        .replace_all(text, " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| !GERMAN_STOP_WORDS.contains(w))
        .collect()
}
