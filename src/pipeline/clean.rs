//! Paragraph cleaning: deterministic cleanup of extracted PDF text.
//!
//! ## Why is cleaning necessary?
//!
//! PDF text extraction is faithful to the page, and the page is full of
//! things a corpus does not want:
//!
//! - layout clutter (`+ = < > • | Ώ`, em-dashes used as rules)
//! - words hyphenated across line breaks (`Partei-\nprogramm`)
//! - page numbers and table-of-contents dot leaders (`12`, `....`, `3.1`)
//! - running headers and footers repeated on every page
//!
//! This module applies a fixed chain of cheap string/regex rules that strip
//! all of the above without touching the remaining content. The rules run
//! in a specific order — later steps depend on earlier normalisation (the
//! duplicate check, for instance, only catches repeated headers once the
//! line breaks inside them have been normalised away).
//!
//! ## A deliberate quirk
//!
//! Both duplicate filters remove *every* occurrence of anything repeated,
//! not "all but the first": a header appearing on thirty pages is corpus
//! noise in all thirty places. And the paragraph-level check runs before
//! the character allow-list while the line-level check runs after it, so
//! two paragraphs differing only in a disallowed character are *not*
//! considered duplicates. That asymmetry is preserved on purpose; it
//! matches the behaviour the downstream analyses were built against.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Clean a sequence of raw paragraphs into one canonical text block.
///
/// Rules (applied in order):
/// 1. Replace clutter symbols (`+ = < > • | Ώ` and the em-dash) with a
///    single space; delete `-\n` to re-join hyphenated words; replace the
///    remaining line breaks inside a paragraph with spaces; delete dot
///    leaders (`....`)
/// 2. Drop paragraphs consisting only of digits and periods (page numbers)
/// 3. Drop every occurrence of any paragraph repeated verbatim
/// 4. Replace characters outside the allow-list with a space
/// 5. Within each paragraph, drop every occurrence of any repeated line,
///    collapse whitespace runs per line, and join the lines back together
/// 6. Drop paragraphs that ended up empty
/// 7. Join the survivors with a blank line
///
/// Cleaning already-clean input is a no-op apart from the `"\n\n"` join.
pub fn clean_paragraphs<S: AsRef<str>>(raw_paragraphs: &[S]) -> String {
    // Rule 1 first: the duplicate and page-number checks below must see
    // normalised text or repeated headers with differing line wrapping
    // would slip through.
    let stripped: Vec<String> = raw_paragraphs
        .iter()
        .map(|p| strip_clutter(p.as_ref()))
        .collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for p in &stripped {
        *occurrences.entry(p.as_str()).or_default() += 1;
    }

    let cleaned: Vec<String> = stripped
        .iter()
        .filter(|p| !is_page_artifact(p) && occurrences[p.as_str()] < 2)
        .map(|p| join_unique_lines(&strip_disallowed(p)))
        .filter(|p| !p.is_empty())
        .collect();

    cleaned.join("\n\n")
}

// ── Rule 1: clutter symbols, hyphenation, line breaks ───────────────────────

static RE_CLUTTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+=<>•|Ώ]").unwrap());

/// Replace extraction clutter with spaces and undo line-wrapping artifacts.
///
/// `-\n` is deleted (re-joining the hyphenated word), all other line breaks
/// become single spaces, and four consecutive periods — the table-of-contents
/// dot leader — are deleted outright.
fn strip_clutter(p: &str) -> String {
    RE_CLUTTER
        .replace_all(p, " ")
        .replace("-\n", "")
        .replace('\n', " ")
        .replace('—', " ")
        .replace("....", "")
}

// ── Rule 2: page-number artifacts ───────────────────────────────────────────

static RE_PAGE_ARTIFACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9.]+$").unwrap());

fn is_page_artifact(p: &str) -> bool {
    RE_PAGE_ARTIFACT.is_match(p)
}

// ── Rule 4: character allow-list ────────────────────────────────────────────

// Letters, digits, whitespace, common punctuation, and the German umlauts/ß.
// Everything else is an extraction artifact and becomes a space.
static RE_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s.;:#(){}'`´/\\^äöüÄÖÜß-]").unwrap());

fn strip_disallowed(p: &str) -> String {
    RE_DISALLOWED.replace_all(p, " ").into_owned()
}

// ── Rule 5: per-paragraph line dedup and whitespace collapse ────────────────

/// Drop every occurrence of any line duplicated within the paragraph,
/// collapse whitespace runs in the survivors, and concatenate them with no
/// separator — line breaks are intentionally not preserved in the output.
fn join_unique_lines(p: &str) -> String {
    let lines: Vec<&str> = p.lines().collect();

    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        *occurrences.entry(line).or_default() += 1;
    }

    lines
        .iter()
        .filter(|line| occurrences[*line] < 2)
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<String>()
}

// ── Tests ────────────────────────────────────────────────────────────────────
