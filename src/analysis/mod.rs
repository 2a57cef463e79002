//! Vocabulary and similarity analyses over the converted corpus.
//!
//! All analyses consume the party → text mapping produced by
//! [`crate::corpus::load_corpus`] and are pure functions of it:
//!
//! 1. [`token`]      — letter-class tokenization and German stop-word removal
//! 2. [`bow`]        — bag-of-words term frequencies and top-N rankings
//! 3. [`tfidf`]      — per-party TF-IDF weights over the shared vocabulary
//! 4. [`similarity`] — cosine similarity and the pairwise party matrix

pub mod bow;
pub mod similarity;
pub mod tfidf;
pub mod token;
