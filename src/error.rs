//! Error types for the parteivergleich library.
//!
//! One structured [`PipelineError`] covers the fatal failure modes of a
//! single operation (open/parse failure, unwritable output, unusable corpus
//! directory). Per-file failures inside a *batch* are deliberately not
//! errors: a bad PDF must never abort the remaining files, so the batch
//! driver records them as data in [`crate::output::FileReport`] and keeps
//! going. Callers that want to treat any recorded failure as fatal can
//! inspect [`crate::output::BatchReport::failed`] themselves.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the parteivergleich library.
///
/// Failures of individual files within a batch are stored in
/// [`crate::output::FileReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// The PDF's internal structure could not be parsed into a text stream.
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raw-programme input directory could not be listed.
    #[error("Failed to read input directory '{path}': {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Corpus errors ─────────────────────────────────────────────────────
    /// The corpus data directory could not be walked.
    #[error("Failed to read corpus directory '{path}': {source}")]
    CorpusDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus loader found no party with any text.
    #[error("No party texts found under '{path}'\nRun `parteivergleich convert` first to produce them.")]
    EmptyCorpus { path: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
