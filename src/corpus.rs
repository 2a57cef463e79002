//! Corpus loading: one explicit function from the data directory to a
//! party → text mapping.
//!
//! The analyses all start from the same shape of input: every party's
//! converted texts concatenated into a single string. Building that mapping
//! here — once, at call time, into an owned value — means the analysis
//! modules never touch the filesystem and there is no module-level mutable
//! state anywhere in the crate.
//!
//! Layout walked: `<data_dir>/<party>/<any subdir>/<file>.txt`. The raw
//! PDF directory is skipped by name, as are derived `lemmatisiert` files
//! (they would double-count their source texts).

use crate::error::PipelineError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Directory under `data_dir` holding raw PDFs rather than a party's texts.
const RAW_DIR_NAME: &str = "raw_programme";

/// File-name fragment marking a derived (lemmatised) file.
const DERIVED_MARKER: &str = "lemmatisiert";

/// Load the full corpus: party name → concatenated text.
///
/// Walks each party directory under `data_dir`, reads every `.txt` file in
/// its subdirectories, and joins the contents with line breaks replaced by
/// spaces. Party order is deterministic (`BTreeMap`). Parties whose
/// directories contain no text are omitted with a warning rather than
/// mapped to empty strings.
///
/// # Errors
/// Fails if `data_dir` itself cannot be listed, or if no party contributed
/// any text at all.
pub fn load_corpus(data_dir: impl AsRef<Path>) -> Result<BTreeMap<String, String>, PipelineError> {
    let data_dir = data_dir.as_ref();
    let entries = std::fs::read_dir(data_dir).map_err(|e| PipelineError::CorpusDirUnreadable {
        path: data_dir.to_path_buf(),
        source: e,
    })?;

    let mut corpus = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| PipelineError::CorpusDirUnreadable {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let party = entry.file_name().to_string_lossy().into_owned();
        if party == RAW_DIR_NAME {
            continue;
        }

        let text = read_party_texts(&path)?;
        if text.trim().is_empty() {
            warn!(party = %party, "No texts found for party, omitting");
            continue;
        }
        debug!(party = %party, chars = text.len(), "Loaded party texts");
        corpus.insert(party, text);
    }

    if corpus.is_empty() {
        return Err(PipelineError::EmptyCorpus {
            path: data_dir.to_path_buf(),
        });
    }
    Ok(corpus)
}

/// Concatenate all `.txt` files in a party's subdirectories.
fn read_party_texts(party_dir: &Path) -> Result<String, PipelineError> {
    let map_err = |e: std::io::Error| PipelineError::CorpusDirUnreadable {
        path: party_dir.to_path_buf(),
        source: e,
    };

    let mut text = String::new();
    let mut subdirs: Vec<_> = std::fs::read_dir(party_dir)
        .map_err(map_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_err)?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        let mut files: Vec<_> = std::fs::read_dir(&subdir)
            .map_err(map_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_err)?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension().is_some_and(|ext| ext == "txt")
                    && !p
                        .file_name()
                        .is_some_and(|n| n.to_string_lossy().contains(DERIVED_MARKER))
            })
            .collect();
        files.sort();

        for file in files {
            let content = std::fs::read_to_string(&file).map_err(map_err)?;
            text.push_str(&content.replace('\n', " "));
            text.push(' ');
        }
    }

    Ok(text)
}
