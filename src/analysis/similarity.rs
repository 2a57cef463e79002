//! Cosine similarity and the pairwise party matrix.
//!
//! Cosine similarity is the shared comparison primitive for every vector
//! view of the corpus — TF-IDF weights and sentence embeddings alike. The
//! matrix type keeps its labels next to its values so output code can never
//! mispair a row with a party.

use serde::{Deserialize, Serialize};

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 for zero-magnitude or mismatched input rather than NaN —
/// a party with an empty vocabulary is simply dissimilar to everything.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

/// A symmetric pairwise similarity matrix with its row/column labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    /// Party names, in row and column order.
    pub labels: Vec<String>,
    /// `values[i][j]` is the similarity between `labels[i]` and `labels[j]`.
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Build the matrix from labelled vectors.
    pub fn from_vectors(labels: Vec<String>, vectors: &[Vec<f64>]) -> Self {
        let n = vectors.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let sim = cosine_similarity(&vectors[i], &vectors[j]);
                values[i][j] = sim;
                values[j][i] = sim;
            }
        }
        Self { labels, values }
    }

    /// Render as an aligned plain-text table, the stand-in for the
    /// original heatmap output.
    pub fn to_table(&self) -> String {
        let width = self
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);

        let mut out = String::new();
        out.push_str(&" ".repeat(width + 2));
        for label in &self.labels {
            out.push_str(&format!("{label:>width$}  "));
        }
        out.push('\n');

        for (label, row) in self.labels.iter().zip(&self.values) {
            out.push_str(&format!("{label:<width$}  "));
            for value in row {
                out.push_str(&format!("{value:>width$.3}  "));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn magnitude_does_not_matter() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn zero_and_mismatched_vectors_yield_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let labels = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let vectors = vec![
            vec![1.0, 0.0, 1.0],
            vec![0.5, 0.5, 0.0],
            vec![0.0, 1.0, 1.0],
        ];
        let m = SimilarityMatrix::from_vectors(labels, &vectors);

        for i in 0..3 {
            assert!((m.values[i][i] - 1.0).abs() < 1e-10);
            for j in 0..3 {
                assert!((m.values[i][j] - m.values[j][i]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn table_contains_all_labels() {
        let labels = vec!["CDU".to_string(), "SPD".to_string()];
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let table = SimilarityMatrix::from_vectors(labels, &vectors).to_table();
        assert!(table.contains("CDU"));
        assert!(table.contains("SPD"));
        assert!(table.contains("1.000"));
    }
}
