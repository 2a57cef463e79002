//! Pipeline stages for PDF-to-text conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and lets us swap the
//! extraction backend without touching the cleaning rules.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ clean ──▶ (convert writes the result)
//! (pdf-extract) (rule chain)
//! ```
//!
//! 1. [`extract`] — validate the input file and pull the linear text stream
//!    out of the PDF, split into raw paragraphs at blank-line boundaries
//! 2. [`clean`]   — deterministic cleanup rules: clutter symbols,
//!    page-number artifacts, duplicate paragraphs/lines, character allow-list

pub mod clean;
pub mod extract;
