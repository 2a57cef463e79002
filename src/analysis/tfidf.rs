//! Per-party TF-IDF weights over the shared corpus vocabulary.
//!
//! Each party's programme is one document. Term frequency is normalised by
//! the most frequent term of that document, inverse document frequency is
//! `ln(N / n)` over the party count — words every party uses (the "wir
//! fordern" boilerplate of the genre) get weight zero, while vocabulary
//! distinctive to one party is boosted. The per-party rankings surface that
//! distinctive vocabulary; the dense vectors feed the similarity matrix.

use crate::analysis::similarity::SimilarityMatrix;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// TF-IDF model fitted over one corpus of tokenised party programmes.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    labels: Vec<String>,
    /// Shared vocabulary, sorted; defines the dimension order of [`Self::vector`].
    vocab: Vec<String>,
    /// Per-party TF-IDF weight per term (sparse).
    weights: Vec<HashMap<String, f64>>,
    /// Per-party dense vectors over `vocab`.
    vectors: Vec<Vec<f64>>,
}

impl TfIdfModel {
    /// Fit the model on tokenised texts, one entry per party.
    ///
    /// Parties with no tokens get all-zero weights; they stay in the model
    /// so matrix rows line up with the corpus.
    pub fn fit(corpus_tokens: &BTreeMap<String, Vec<String>>) -> Self {
        let labels: Vec<String> = corpus_tokens.keys().cloned().collect();
        let docs: Vec<&Vec<String>> = corpus_tokens.values().collect();
        let n_docs = docs.len();

        // Raw term frequencies per document.
        let tfs: Vec<HashMap<&str, usize>> = docs
            .iter()
            .map(|tokens| {
                let mut tf = HashMap::new();
                for token in tokens.iter() {
                    *tf.entry(token.as_str()).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // Document frequency per term, over the union vocabulary.
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &tfs {
            for term in tf.keys() {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let idf: HashMap<&str, f64> = doc_freq
            .iter()
            .map(|(&term, &n)| (term, (n_docs as f64 / n as f64).ln()))
            .collect();

        let vocab: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();

        // Relative term frequency times idf, per document.
        let weights: Vec<HashMap<String, f64>> = tfs
            .iter()
            .map(|tf| {
                let max_freq = tf.values().copied().max().unwrap_or(0);
                if max_freq == 0 {
                    return HashMap::new();
                }
                tf.iter()
                    .map(|(&term, &freq)| {
                        let rel_tf = freq as f64 / max_freq as f64;
                        (term.to_string(), rel_tf * idf[term])
                    })
                    .collect()
            })
            .collect();

        let vectors: Vec<Vec<f64>> = weights
            .iter()
            .map(|w| vocab.iter().map(|t| w.get(t).copied().unwrap_or(0.0)).collect())
            .collect();

        debug!(
            parties = labels.len(),
            vocabulary = vocab.len(),
            "Fitted TF-IDF model"
        );

        Self {
            labels,
            vocab,
            weights,
            vectors,
        }
    }

    /// Party names, in fit (sorted) order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The shared vocabulary, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocab
    }

    /// The `n` highest-weighted terms for one party, descending.
    ///
    /// Ties break alphabetically for deterministic output. `None` if the
    /// party is not in the model.
    pub fn top_terms(&self, party: &str, n: usize) -> Option<Vec<(String, f64)>> {
        let idx = self.labels.iter().position(|l| l == party)?;
        let mut ranked: Vec<(String, f64)> = self.weights[idx]
            .iter()
            .map(|(t, &w)| (t.clone(), w))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(n);
        Some(ranked)
    }

    /// Dense TF-IDF vector for one party over [`Self::vocabulary`].
    pub fn vector(&self, party: &str) -> Option<&[f64]> {
        let idx = self.labels.iter().position(|l| l == party)?;
        Some(&self.vectors[idx])
    }

    /// Pairwise cosine similarity between all parties' TF-IDF vectors.
    pub fn similarity_matrix(&self) -> SimilarityMatrix {
        SimilarityMatrix::from_vectors(self.labels.clone(), &self.vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(party, words)| {
                (
                    party.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn term_in_every_document_has_zero_weight() {
        let model = TfIdfModel::fit(&corpus(&[
            ("A", &["gemeinsam", "klima"]),
            ("B", &["gemeinsam", "arbeit"]),
        ]));
        let top = model.top_terms("A", 10).unwrap();
        let weight_of = |term: &str| top.iter().find(|(t, _)| t == term).map(|(_, w)| *w);
        assert_eq!(weight_of("gemeinsam"), Some(0.0));
        assert!(weight_of("klima").unwrap() > 0.0);
    }

    #[test]
    fn distinctive_terms_rank_first() {
        let model = TfIdfModel::fit(&corpus(&[
            ("A", &["klima", "klima", "klima", "gemeinsam"]),
            ("B", &["arbeit", "gemeinsam"]),
            ("C", &["europa", "gemeinsam"]),
        ]));
        let top = model.top_terms("A", 1).unwrap();
        assert_eq!(top[0].0, "klima");
        // rel_tf = 1.0, idf = ln(3/1)
        assert!((top[0].1 - (3.0f64).ln()).abs() < 1e-10);
    }

    #[test]
    fn vectors_share_the_sorted_vocabulary() {
        let model = TfIdfModel::fit(&corpus(&[
            ("A", &["zebra", "apfel"]),
            ("B", &["mitte"]),
        ]));
        assert_eq!(model.vocabulary(), ["apfel", "mitte", "zebra"]);
        assert_eq!(model.vector("A").unwrap().len(), 3);
        assert_eq!(model.vector("B").unwrap().len(), 3);
        assert!(model.vector("D").is_none());
    }

    #[test]
    fn identical_documents_have_unit_similarity() {
        let model = TfIdfModel::fit(&corpus(&[
            ("A", &["klima", "arbeit"]),
            ("B", &["klima", "arbeit"]),
            ("C", &["europa", "grenzen"]),
        ]));
        let m = model.similarity_matrix();
        assert_eq!(m.labels, vec!["A", "B", "C"]);
        assert!((m.values[0][1] - 1.0).abs() < 1e-10);
        // A and C share no vocabulary with non-zero weight.
        assert!(m.values[0][2].abs() < 1e-10);
    }

    #[test]
    fn empty_party_gets_zero_vector_not_nan() {
        let model = TfIdfModel::fit(&corpus(&[("A", &["klima"]), ("LEER", &[])]));
        let v = model.vector("LEER").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
        let m = model.similarity_matrix();
        assert!(m.values.iter().flatten().all(|x| x.is_finite()));
    }
}
