//! Conversion entry points: one file, or a whole programme directory.
//!
//! ## Continue-on-error, but observable
//!
//! The batch driver processes files strictly in sequence and never aborts
//! on a bad input: a corrupt PDF yields a logged error line and a
//! [`FileReport`] carrying the detail, and the run moves on. What it does
//! *not* do is pretend everything succeeded — the report separates
//! successes from failures so automation can react, while the exit-code
//! contract (batch conversion itself succeeds) stays intact for callers
//! that only care about "did the batch run".

use crate::config::{party_stem, BatchConfig};
use crate::error::PipelineError;
use crate::output::{BatchReport, FileReport, FileStats};
use crate::pipeline::{clean, extract};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a single PDF to a cleaned text file.
///
/// Extracts the raw paragraphs, cleans them, and writes the result
/// atomically (temp file + rename) so a crash mid-write never leaves a
/// truncated programme behind. Parent directories are created as needed.
///
/// # Errors
/// Any failure — unreadable input, malformed PDF, unwritable output — is
/// returned to the caller. Batch behaviour (continue on error) lives in
/// [`convert_dir`], not here.
pub fn convert_file(
    pdf_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> Result<FileStats, PipelineError> {
    let pdf_path = pdf_path.as_ref();
    let out_path = out_path.as_ref();
    let start = Instant::now();

    let raw_paragraphs = extract::extract_paragraphs(pdf_path)?;
    let text = clean::clean_paragraphs(&raw_paragraphs);
    let kept_paragraphs = if text.is_empty() {
        0
    } else {
        text.split("\n\n").count()
    };

    write_atomic(out_path, &text)?;

    let stats = FileStats {
        raw_paragraphs: raw_paragraphs.len(),
        kept_paragraphs,
        bytes_written: text.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    debug!(
        input = %pdf_path.display(),
        output = %out_path.display(),
        raw = stats.raw_paragraphs,
        kept = stats.kept_paragraphs,
        "Converted programme"
    );

    Ok(stats)
}

/// Convert every programme PDF in `config.raw_dir`.
///
/// Output paths follow the layout convention in [`BatchConfig`]. Files are
/// processed one at a time in sorted name order; per-file failures are
/// recorded and logged, never propagated.
///
/// # Errors
/// Only a fatal condition fails the whole batch: the input directory
/// cannot be listed.
pub fn convert_dir(config: &BatchConfig) -> Result<BatchReport, PipelineError> {
    convert_dir_with(config, |_| {})
}

/// Like [`convert_dir`], invoking `on_file` after each file completes.
///
/// The callback receives the finished [`FileReport`]; the CLI uses it to
/// drive its progress bar without the library knowing anything about
/// terminals.
pub fn convert_dir_with(
    config: &BatchConfig,
    mut on_file: impl FnMut(&FileReport),
) -> Result<BatchReport, PipelineError> {
    let start = Instant::now();
    let inputs = list_programme_files(config)?;
    info!(
        dir = %config.raw_dir.display(),
        count = inputs.len(),
        "Starting batch conversion"
    );

    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = party_stem(&input);
        let output = config.output_path(&stem);

        let report = match convert_file(&input, &output) {
            Ok(stats) => FileReport {
                input,
                output,
                stats: Some(stats),
                error: None,
            },
            Err(e) => {
                warn!(input = %input.display(), error = %e, "Unable to convert PDF");
                FileReport {
                    input,
                    output,
                    stats: None,
                    error: Some(e.to_string()),
                }
            }
        };

        on_file(&report);
        files.push(report);
    }

    let report = BatchReport::from_files(files, start.elapsed().as_millis() as u64);
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        duration_ms = report.total_duration_ms,
        "Batch conversion complete"
    );
    Ok(report)
}

/// Paragraph counts for a PDF without writing anything.
///
/// The CLI's `inspect` command uses this to preview what cleaning would do
/// to a document.
pub fn inspect(pdf_path: impl AsRef<Path>) -> Result<FileStats, PipelineError> {
    let start = Instant::now();
    let raw_paragraphs = extract::extract_paragraphs(pdf_path)?;
    let text = clean::clean_paragraphs(&raw_paragraphs);
    let kept_paragraphs = if text.is_empty() {
        0
    } else {
        text.split("\n\n").count()
    };
    Ok(FileStats {
        raw_paragraphs: raw_paragraphs.len(),
        kept_paragraphs,
        bytes_written: text.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// List the programme PDFs in the input directory, sorted by name.
///
/// Subdirectories and sidecar files (`.dvc`, `.gitignore`) are skipped.
fn list_programme_files(config: &BatchConfig) -> Result<Vec<PathBuf>, PipelineError> {
    let entries =
        std::fs::read_dir(&config.raw_dir).map_err(|e| PipelineError::InputDirUnreadable {
            path: config.raw_dir.clone(),
            source: e,
        })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::InputDirUnreadable {
            path: config.raw_dir.clone(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if config.is_sidecar(&name) {
            debug!(file = %name, "Skipping sidecar file");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Write `content` to `path` atomically: temp file in the same directory,
/// then rename over the target.
fn write_atomic(path: &Path, content: &str) -> Result<(), PipelineError> {
    let map_err = |e: std::io::Error| PipelineError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(map_err)?;
    }

    let tmp_path = path.with_extension("txt.tmp");
    std::fs::write(&tmp_path, content).map_err(map_err)?;
    std::fs::rename(&tmp_path, path).map_err(map_err)?;

    Ok(())
}
