//! CLI binary for parteivergleich.
//!
//! A thin shim over the library crate that maps CLI flags to the batch
//! config and analysis calls and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use parteivergleich::analysis::{bow, token};
use parteivergleich::{
    convert_dir_with, inspect, load_corpus, BatchConfig, FileReport, TfIdfModel,
};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert all programme PDFs in data/raw_programme/
  parteivergleich convert

  # Convert a non-standard layout
  parteivergleich convert --raw-dir pdfs/ --data-dir corpus/

  # Preview what cleaning does to one document
  parteivergleich inspect data/raw_programme/SPD.pdf

  # Most frequent content words per party
  parteivergleich bow --top 10

  # Distinctive vocabulary and the party similarity matrix
  parteivergleich tfidf --top 10 --matrix

  # Machine-readable output for any subcommand
  parteivergleich convert --json > report.json

LAYOUT:
  Input:   <raw-dir>/<party>.pdf           (sidecar .dvc/.gitignore skipped)
  Output:  <data-dir>/<party>/Parteiprogramm/<party>.txt

  A failed file produces no output text file plus one logged error line;
  the batch continues and the process still exits 0. Check the report (or
  --json) to detect per-file failures programmatically.
"#;

/// Convert party-programme PDFs to cleaned text and compare parties.
#[derive(Parser, Debug)]
#[command(
    name = "parteivergleich",
    version,
    about = "Convert party-programme PDFs to cleaned text and compare parties",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PARTEI_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, global = true, env = "PARTEI_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert every programme PDF in the raw directory to cleaned text.
    Convert {
        /// Directory holding the raw programme PDFs.
        #[arg(long, env = "PARTEI_RAW_DIR", default_value = "data/raw_programme")]
        raw_dir: PathBuf,

        /// Root of the per-party output tree.
        #[arg(long, env = "PARTEI_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Print the batch report as JSON instead of the summary.
        #[arg(long)]
        json: bool,

        /// Disable the progress bar.
        #[arg(long)]
        no_progress: bool,
    },

    /// Show paragraph counts for one PDF without writing anything.
    Inspect {
        /// The PDF to inspect.
        input: PathBuf,

        /// Print the stats as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Most frequent content words per party (bag-of-words).
    Bow {
        /// Root of the per-party corpus tree.
        #[arg(long, env = "PARTEI_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// How many terms to show per party.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print the rankings as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Distinctive vocabulary per party and the TF-IDF similarity matrix.
    Tfidf {
        /// Root of the per-party corpus tree.
        #[arg(long, env = "PARTEI_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// How many terms to show per party.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Also print the pairwise cosine-similarity matrix.
        #[arg(long)]
        matrix: bool,

        /// Print everything as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Pairwise party similarity from sentence-transformer embeddings.
    #[cfg(feature = "embeddings")]
    Similarity {
        /// Directory containing model.onnx and tokenizer.json.
        #[arg(long, env = "PARTEI_MODEL_DIR")]
        model_dir: PathBuf,

        /// Root of the per-party corpus tree.
        #[arg(long, env = "PARTEI_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Print the matrix as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            raw_dir,
            data_dir,
            json,
            no_progress,
        } => run_convert(
            raw_dir,
            data_dir,
            json,
            cli.quiet || no_progress || json,
            cli.quiet || json,
        ),
        Command::Inspect { input, json } => run_inspect(input, json),
        Command::Bow { data_dir, top, json } => run_bow(data_dir, top, json),
        Command::Tfidf {
            data_dir,
            top,
            matrix,
            json,
        } => run_tfidf(data_dir, top, matrix, json),
        #[cfg(feature = "embeddings")]
        Command::Similarity {
            model_dir,
            data_dir,
            json,
        } => run_similarity(model_dir, data_dir, json),
    }
}

fn run_convert(
    raw_dir: PathBuf,
    data_dir: PathBuf,
    json: bool,
    no_progress: bool,
    quiet: bool,
) -> Result<()> {
    let config = BatchConfig::builder()
        .raw_dir(raw_dir)
        .data_dir(data_dir)
        .build()
        .context("Invalid configuration")?;

    let bar = if no_progress {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let on_file = |report: &FileReport| {
        let Some(ref bar) = bar else { return };
        let name = report.input.file_name().unwrap_or_default().to_string_lossy();
        match &report.stats {
            Some(stats) => bar.println(format!(
                "  {} {:<24} {}  {}",
                green("✓"),
                name,
                dim(&format!("{:>4} paragraphs", stats.kept_paragraphs)),
                dim(&format!("{:.1}s", stats.duration_ms as f64 / 1000.0)),
            )),
            None => bar.println(format!(
                "  {} {:<24} {}",
                red("✗"),
                name,
                red(report.error.as_deref().unwrap_or("unknown error")),
            )),
        }
        bar.inc(1);
    };

    let report = convert_dir_with(&config, on_file).context("Batch conversion failed")?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        let total = report.files.len();
        if report.failed == 0 {
            eprintln!(
                "{} {} programmes converted in {}ms",
                green("✔"),
                bold(&report.succeeded.to_string()),
                report.total_duration_ms
            );
        } else {
            eprintln!(
                "{} {}/{} programmes converted  ({} failed)",
                red("⚠"),
                bold(&report.succeeded.to_string()),
                total,
                red(&report.failed.to_string()),
            );
        }
    }

    // Per-file failures are report data, not an exit code: one bad scan
    // must not fail the nightly batch run.
    Ok(())
}

fn run_inspect(input: PathBuf, json: bool) -> Result<()> {
    let stats = inspect(&input).context("Failed to inspect PDF")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("File:            {}", input.display());
        println!("Raw paragraphs:  {}", stats.raw_paragraphs);
        println!("Kept paragraphs: {}", stats.kept_paragraphs);
        println!("Cleaned bytes:   {}", stats.bytes_written);
    }
    Ok(())
}

fn tokenized_corpus(data_dir: &PathBuf) -> Result<BTreeMap<String, Vec<String>>> {
    let corpus = load_corpus(data_dir).context("Failed to load corpus")?;
    Ok(corpus
        .into_iter()
        .map(|(party, text)| (party, token::tokenize(&text)))
        .collect())
}

fn run_bow(data_dir: PathBuf, top: usize, json: bool) -> Result<()> {
    let corpus = tokenized_corpus(&data_dir)?;

    let rankings: BTreeMap<String, Vec<(String, usize)>> = corpus
        .iter()
        .map(|(party, tokens)| {
            let freqs = bow::term_frequencies(tokens);
            (party.clone(), bow::top_terms(&freqs, top))
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }

    for (party, terms) in &rankings {
        println!("{}", bold(party));
        for (rank, (term, count)) in terms.iter().enumerate() {
            println!("  {:>2}. {:<24} {}", rank + 1, term, dim(&count.to_string()));
        }
        println!();
    }
    Ok(())
}

fn run_tfidf(data_dir: PathBuf, top: usize, matrix: bool, json: bool) -> Result<()> {
    let corpus = tokenized_corpus(&data_dir)?;
    let model = TfIdfModel::fit(&corpus);

    let rankings: BTreeMap<String, Vec<(String, f64)>> = model
        .labels()
        .iter()
        .filter_map(|party| {
            model
                .top_terms(party, top)
                .map(|terms| (party.clone(), terms))
        })
        .collect();

    if json {
        let mut doc = serde_json::Map::new();
        doc.insert("top_terms".into(), serde_json::to_value(&rankings)?);
        if matrix {
            doc.insert(
                "similarity".into(),
                serde_json::to_value(model.similarity_matrix())?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for (party, terms) in &rankings {
        println!("{}", bold(party));
        for (rank, (term, score)) in terms.iter().enumerate() {
            println!(
                "  {:>2}. {:<24} {}",
                rank + 1,
                term,
                dim(&format!("{score:.4}"))
            );
        }
        println!();
    }

    if matrix {
        println!("{}", bold("Cosine similarity (TF-IDF)"));
        print!("{}", model.similarity_matrix().to_table());
    }
    Ok(())
}

#[cfg(feature = "embeddings")]
fn run_similarity(model_dir: PathBuf, data_dir: PathBuf, json: bool) -> Result<()> {
    use parteivergleich::SentenceEmbedder;

    let corpus = load_corpus(&data_dir).context("Failed to load corpus")?;
    let mut embedder =
        SentenceEmbedder::load(&model_dir).context("Failed to load embedding model")?;
    let matrix = embedder
        .party_similarity(&corpus)
        .context("Failed to embed party texts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
    } else {
        println!("{}", bold("Cosine similarity (sentence embeddings)"));
        print!("{}", matrix.to_table());
    }
    Ok(())
}
