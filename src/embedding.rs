//! Sentence-transformer embeddings via local ONNX inference.
//!
//! TF-IDF compares parties by shared *words*; two programmes arguing the
//! same position in different vocabulary score low. Sentence embeddings
//! close that gap: each party's text is embedded into a dense vector with
//! a BERT-family sentence-transformer model and compared by cosine
//! similarity, so "Klimaschutz" and "Erderwärmung" land near each other
//! even though they share no characters.
//!
//! The model runs locally through `ort` — no API calls. Mean pooling over
//! the attention mask matches how these models are trained. The whole
//! module is behind the `embeddings` feature because the ONNX runtime is a
//! heavyweight build-time dependency the default pipeline does not need.

use std::path::Path;

use thiserror::Error;
use tokenizers::Tokenizer;
use tracing::debug;

use crate::analysis::similarity::SimilarityMatrix;

/// Errors from model loading and inference.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// `model.onnx` or `tokenizer.json` missing from the model directory.
    #[error("Embedding model file not found: '{path}'\nExpected model.onnx and tokenizer.json in the model directory.")]
    ModelNotFound { path: String },

    /// The ONNX session could not be created or run.
    #[error("ONNX inference failed: {detail}")]
    Inference { detail: String },

    /// The tokenizer could not be loaded or applied.
    #[error("Tokenization failed: {detail}")]
    Tokenization { detail: String },
}

/// Sentence embedder backed by a local ONNX model.
///
/// Expects `model.onnx` and `tokenizer.json` in one directory — the file
/// pair exported by the sentence-transformers ONNX conversion tooling.
pub struct SentenceEmbedder {
    session: ort::session::Session,
    tokenizer: Tokenizer,
}

impl SentenceEmbedder {
    /// Load the model and tokenizer from `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self, EmbeddingError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(EmbeddingError::ModelNotFound {
                    path: path.display().to_string(),
                });
            }
        }

        let session = ort::session::Session::builder()
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| EmbeddingError::Inference {
                detail: e.to_string(),
            })?;

        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| EmbeddingError::Tokenization {
                detail: e.to_string(),
            })?;

        debug!(dir = %model_dir.display(), "Loaded sentence embedding model");

        Ok(Self { session, tokenizer })
    }

    /// Embed a batch of texts into dense vectors.
    ///
    /// Each text is tokenised, run through the model, and mean-pooled over
    /// the attention mask into a single vector. The embedding dimension is
    /// taken from the model's output shape.
    pub fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings: Vec<_> = texts
            .iter()
            .map(|t| {
                self.tokenizer
                    .encode(t.as_str(), true)
                    .map_err(|e| EmbeddingError::Tokenization {
                        detail: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        if max_len == 0 {
            return Ok(vec![Vec::new(); batch_size]);
        }

        // Padded BERT inputs: token ids, attention mask (1 = real token),
        // token type ids (all zero for single-segment input).
        let mut input_ids: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut token_type_ids: Vec<i64> = Vec::with_capacity(batch_size * max_len);

        for enc in &encodings {
            let ids = enc.get_ids();
            let mask = enc.get_attention_mask();
            let pad = max_len - ids.len();

            input_ids.extend(ids.iter().map(|&id| id as i64));
            attention_mask.extend(mask.iter().map(|&m| m as i64));
            token_type_ids.extend(std::iter::repeat(0i64).take(ids.len()));

            input_ids.extend(std::iter::repeat(0i64).take(pad));
            attention_mask.extend(std::iter::repeat(0i64).take(pad));
            token_type_ids.extend(std::iter::repeat(0i64).take(pad));
        }

        let shape = [batch_size as i64, max_len as i64];
        let inference = |detail: String| EmbeddingError::Inference { detail };

        let input_ids_tensor = ort::value::Tensor::from_array((shape, input_ids))
            .map_err(|e| inference(e.to_string()))?;
        let attention_tensor = ort::value::Tensor::from_array((shape, attention_mask.clone()))
            .map_err(|e| inference(e.to_string()))?;
        let token_type_tensor = ort::value::Tensor::from_array((shape, token_type_ids))
            .map_err(|e| inference(e.to_string()))?;

        // Output is last_hidden_state: [batch, seq_len, dim].
        let outputs = self
            .session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_tensor,
                "token_type_ids" => token_type_tensor
            })
            .map_err(|e| inference(e.to_string()))?;

        let (out_shape, hidden) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| inference(e.to_string()))?;
        let dim = *out_shape.last().ok_or_else(|| {
            inference("model output has no dimensions".to_string())
        })? as usize;

        // Mean pooling: average token vectors weighted by the attention
        // mask, so padding never contributes.
        let mut embeddings = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let mut sum = vec![0.0_f64; dim];
            let mut mask_sum = 0.0_f64;

            for j in 0..max_len {
                let mask_val = attention_mask[i * max_len + j] as f64;
                if mask_val > 0.0 {
                    mask_sum += mask_val;
                    let offset = (i * max_len + j) * dim;
                    for k in 0..dim {
                        sum[k] += hidden[offset + k] as f64 * mask_val;
                    }
                }
            }

            if mask_sum > 0.0 {
                for val in &mut sum {
                    *val /= mask_sum;
                }
            }
            embeddings.push(sum);
        }

        debug!(batch = batch_size, dim, "Computed sentence embeddings");
        Ok(embeddings)
    }

    /// Embed each party's text and build the pairwise similarity matrix.
    pub fn party_similarity(
        &mut self,
        corpus: &std::collections::BTreeMap<String, String>,
    ) -> Result<SimilarityMatrix, EmbeddingError> {
        let labels: Vec<String> = corpus.keys().cloned().collect();
        let texts: Vec<String> = corpus.values().cloned().collect();
        let vectors = self.embed_batch(&texts)?;
        Ok(SimilarityMatrix::from_vectors(labels, &vectors))
    }
}
