//! Configuration for batch conversion and the corpus directory layout.
//!
//! The layout convention is inherited from the original data set: raw PDFs
//! live in one flat directory, and each converted programme is written to
//! `<data_dir>/<party>/<programme_subdir>/<party>.txt` where `<party>` is
//! the PDF's base name. Every path in that convention is a field here, so
//! tests and non-standard layouts never have to touch the filesystem code.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on the
//! documented defaults for the rest.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a batch conversion run.
///
/// Built via [`BatchConfig::builder()`] or [`BatchConfig::default()`].
///
/// # Example
/// ```rust
/// use parteivergleich::BatchConfig;
///
/// let config = BatchConfig::builder()
///     .raw_dir("fixtures/pdfs")
///     .data_dir("fixtures/data")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory holding the raw programme PDFs. Default: `data/raw_programme`.
    pub raw_dir: PathBuf,

    /// Root of the per-party output tree. Default: `data`.
    pub data_dir: PathBuf,

    /// Subdirectory under each party holding the converted programme text.
    /// Default: `Parteiprogramm`.
    pub programme_subdir: String,

    /// File-name suffixes to skip when listing `raw_dir`. These are sidecar
    /// files produced by data-versioning tools, not documents.
    /// Default: `.dvc`, `.gitignore`.
    pub ignore_suffixes: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw_programme"),
            data_dir: PathBuf::from("data"),
            programme_subdir: "Parteiprogramm".to_string(),
            ignore_suffixes: vec![".dvc".to_string(), ".gitignore".to_string()],
        }
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder {
            config: Self::default(),
        }
    }

    /// Output path for a converted programme, derived from the PDF's base
    /// name: `<data_dir>/<stem>/<programme_subdir>/<stem>.txt`.
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.data_dir
            .join(stem)
            .join(&self.programme_subdir)
            .join(format!("{stem}.txt"))
    }

    /// Whether a directory entry in `raw_dir` should be skipped.
    pub fn is_sidecar(&self, file_name: &str) -> bool {
        self.ignore_suffixes.iter().any(|s| file_name.ends_with(s))
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug)]
pub struct BatchConfigBuilder {
    config: BatchConfig,
}

impl BatchConfigBuilder {
    pub fn raw_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.raw_dir = dir.into();
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    pub fn programme_subdir(mut self, name: impl Into<String>) -> Self {
        self.config.programme_subdir = name.into();
        self
    }

    pub fn ignore_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.config.ignore_suffixes = suffixes;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, PipelineError> {
        let c = &self.config;
        if c.programme_subdir.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "programme_subdir must not be empty".into(),
            ));
        }
        if c.programme_subdir.contains(std::path::MAIN_SEPARATOR) {
            return Err(PipelineError::InvalidConfig(format!(
                "programme_subdir must be a single path component, got '{}'",
                c.programme_subdir
            )));
        }
        Ok(self.config)
    }
}

/// Base name of a PDF path, used as the party identifier.
///
/// `data/raw_programme/CDU.pdf` → `CDU`. Falls back to the full file name
/// when there is no extension.
pub fn party_stem(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
