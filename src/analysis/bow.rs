//! Bag-of-words term frequencies.
//!
//! The simplest of the vocabulary views: count how often each token occurs
//! in one party's text and report the most frequent. Useful as a sanity
//! check before the weighted analyses — if the top terms look wrong here,
//! the conversion or tokenization is broken, not the TF-IDF math.

use std::collections::HashMap;

/// Count occurrences of each token.
pub fn term_frequencies(tokens: &[String]) -> HashMap<String, usize> {
    let mut freqs = HashMap::new();
    for token in tokens {
        *freqs.entry(token.clone()).or_insert(0) += 1;
    }
    freqs
}

/// The `n` most frequent terms, descending by count.
///
/// Ties are broken alphabetically so the ranking is deterministic across
/// runs — hash-map iteration order must never leak into output.
pub fn top_terms(freqs: &HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> =
        freqs.iter().map(|(w, &c)| (w.clone(), c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn counts_occurrences() {
        let freqs = term_frequencies(&tokens(&["arbeit", "klima", "arbeit"]));
        assert_eq!(freqs["arbeit"], 2);
        assert_eq!(freqs["klima"], 1);
    }

    #[test]
    fn top_terms_ranks_descending_with_alphabetical_ties() {
        let freqs = term_frequencies(&tokens(&[
            "klima", "klima", "klima", "arbeit", "arbeit", "zukunft", "bildung",
        ]));
        let top = top_terms(&freqs, 3);
        assert_eq!(
            top,
            vec![
                ("klima".to_string(), 3),
                ("arbeit".to_string(), 2),
                ("bildung".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_terms_handles_short_vocabularies() {
        let freqs = term_frequencies(&tokens(&["einzig"]));
        assert_eq!(top_terms(&freqs, 10).len(), 1);
        assert!(top_terms(&HashMap::new(), 10).is_empty());
    }
}
