//! # parteivergleich
//!
//! Convert party-programme PDFs into cleaned plain text, then compare the
//! parties by vocabulary and similarity.
//!
//! ## Why this crate?
//!
//! PDF text extraction is only the first half of building a usable corpus.
//! Programme PDFs are full of extraction artifacts — clutter symbols,
//! hyphenated line wraps, page numbers, headers repeated on every page —
//! that poison every downstream word count. This crate pairs a
//! deterministic cleaning pipeline with the classic vocabulary analyses
//! (bag-of-words, TF-IDF, cosine similarity) so the whole path from PDF to
//! comparison lives in one place.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract  pull the linear text stream, split into raw paragraphs
//!  ├─ 2. Clean    clutter symbols, artifacts, duplicate paragraphs/lines
//!  ├─ 3. Write    data/<party>/Parteiprogramm/<party>.txt  (atomic)
//!  │
//!  └─ 4. Analyse  corpus loader → tokenize → bow / tfidf / similarity
//! ```
//!
//! Steps 1–3 run per file, sequentially, continue-on-error across a batch;
//! step 4 consumes the written texts as one corpus.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parteivergleich::{convert_dir, load_corpus, BatchConfig, TfIdfModel};
//! use parteivergleich::analysis::token::tokenize;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BatchConfig::default();
//!     let report = convert_dir(&config)?;
//!     eprintln!("{}/{} programmes converted", report.succeeded, report.files.len());
//!
//!     let corpus = load_corpus(&config.data_dir)?;
//!     let tokens = corpus
//!         .iter()
//!         .map(|(party, text)| (party.clone(), tokenize(text)))
//!         .collect();
//!     let model = TfIdfModel::fit(&tokens);
//!     print!("{}", model.similarity_matrix().to_table());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature      | Default | Description |
//! |--------------|---------|-------------|
//! | `cli`        | on      | Enables the `parteivergleich` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `embeddings` | off     | Sentence-transformer similarity via local ONNX inference (`ort` + `tokenizers`) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! parteivergleich = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analysis;
pub mod config;
pub mod convert;
pub mod corpus;
#[cfg(feature = "embeddings")]
pub mod embedding;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analysis::similarity::{cosine_similarity, SimilarityMatrix};
pub use analysis::tfidf::TfIdfModel;
pub use config::{BatchConfig, BatchConfigBuilder};
pub use convert::{convert_dir, convert_dir_with, convert_file, inspect};
pub use corpus::load_corpus;
#[cfg(feature = "embeddings")]
pub use embedding::SentenceEmbedder;
pub use error::PipelineError;
pub use output::{BatchReport, FileReport, FileStats};
pub use pipeline::clean::clean_paragraphs;
pub use pipeline::extract::extract_paragraphs;
