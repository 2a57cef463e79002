//! Paragraph extraction: pull raw paragraph strings out of a PDF.
//!
//! ## Why validate before parsing?
//!
//! `pdf-extract` reports malformed input with a parser-internal message that
//! means little to a user who pointed the tool at the wrong file. Checking
//! existence, readability, and the `%PDF` magic bytes up front turns the
//! three common mistakes (typo in the path, unreadable file, not actually a
//! PDF) into three distinct, actionable errors before the parser ever runs.
//!
//! The file handle is scoped to this module: opened, read, and closed within
//! one call, on every exit path.

use crate::error::PipelineError;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Extract all raw paragraphs from a PDF, in document order.
///
/// Pages are walked in order and their text concatenated into one stream;
/// paragraphs are the runs between literal blank-line (`"\n\n"`) boundaries
/// of that stream. Elements may be empty or contain only whitespace or
/// digits — filtering is the cleaner's job, not the extractor's.
pub fn extract_paragraphs(path: impl AsRef<Path>) -> Result<Vec<String>, PipelineError> {
    let text = extract_text(path.as_ref())?;
    Ok(split_paragraphs(&text))
}

/// Extract the full linear text stream of a PDF.
pub fn extract_text(path: &Path) -> Result<String, PipelineError> {
    let bytes = read_pdf_bytes(path)?;

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        PipelineError::ExtractionFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
    })?;

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        chars = text.len(),
        "Extracted text stream"
    );

    Ok(text)
}

/// Split a text stream into paragraph candidates at blank-line boundaries.
///
/// Mirrors `str::split` semantics exactly: consecutive boundaries yield
/// empty elements and nothing is trimmed. The cleaner relies on receiving
/// the stream unmodified.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n").map(str::to_string).collect()
}

/// Read the file into memory, mapping I/O failures to structured errors and
/// rejecting files without the `%PDF` magic bytes.
fn read_pdf_bytes(path: &Path) -> Result<Vec<u8>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(PipelineError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(PipelineError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| PipelineError::ExtractionFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(PipelineError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn split_on_double_newline() {
        let text = "Erster Absatz\nmit Umbruch\n\nZweiter Absatz\n\nDritter";
        assert_eq!(
            split_paragraphs(text),
            vec!["Erster Absatz\nmit Umbruch", "Zweiter Absatz", "Dritter"]
        );
    }

    #[test]
    fn split_keeps_empty_candidates() {
        // Three consecutive blank-line markers produce empty elements; the
        // cleaner is responsible for dropping them.
        assert_eq!(split_paragraphs("a\n\n\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_paragraphs(""), vec![""]);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = extract_paragraphs("no/such/file.pdf").unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_is_rejected_by_magic_bytes() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Hallo Welt, kein PDF").unwrap();
        let err = extract_paragraphs(f.path()).unwrap_err();
        match err {
            PipelineError::NotAPdf { magic, .. } => assert_eq!(&magic, b"Hall"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn truncated_pdf_fails_extraction() {
        // Valid magic bytes, garbage body: must fail with an extraction
        // error, not panic or return empty text.
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.5\nnot actually a pdf body").unwrap();
        let err = extract_paragraphs(f.path()).unwrap_err();
        assert!(matches!(err, PipelineError::ExtractionFailed { .. }));
    }
}
