//! Result types for single-file and batch conversion.
//!
//! A batch must never abort because one PDF is broken, but the caller must
//! still be able to *see* which files failed. Each file therefore gets a
//! [`FileReport`] carrying either stats or an error string, and the batch
//! driver aggregates them into a [`BatchReport`]. Everything serialises to
//! JSON for the CLI's `--json` mode and for downstream automation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Statistics for one successfully converted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStats {
    /// Paragraph candidates extracted from the PDF's text stream.
    pub raw_paragraphs: usize,
    /// Paragraphs surviving the cleaning rules.
    pub kept_paragraphs: usize,
    /// Bytes of UTF-8 text written to the output file.
    pub bytes_written: usize,
    /// Wall-clock conversion time for this file.
    pub duration_ms: u64,
}

/// Outcome of converting one file within a batch.
///
/// Exactly one of `stats` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// The input PDF.
    pub input: PathBuf,
    /// The derived output path. Present even on failure so callers can see
    /// where the file *would* have gone (and check for stale output).
    pub output: PathBuf,
    /// Conversion statistics, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FileStats>,
    /// Error detail, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate outcome of a batch conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-file outcomes, in processing (sorted file-name) order.
    pub files: Vec<FileReport>,
    /// Count of files converted successfully.
    pub succeeded: usize,
    /// Count of files that failed.
    pub failed: usize,
    /// Wall-clock time for the whole batch.
    pub total_duration_ms: u64,
}

impl BatchReport {
    /// Assemble a report from per-file outcomes.
    pub fn from_files(files: Vec<FileReport>, total_duration_ms: u64) -> Self {
        let succeeded = files.iter().filter(|f| f.succeeded()).count();
        let failed = files.len() - succeeded;
        Self {
            files,
            succeeded,
            failed,
            total_duration_ms,
        }
    }

    /// The reports of files that failed, for post-run summaries.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.succeeded())
    }
}
