//! Seed word lists and context records.
//!
//! Seeds: one word per line. Context records: a noun phrase, a literal `*` token, then
//! anything, with the pattern id as the last token:
//!
//! ```text
//! the big dog * <subj>_barked
//! a stray cat * 12 chased_<dobj>
//! ```
//!
//! The head noun is the token right before the `*` (`dog`, `cat`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};
use crate::patterns::PatternTable;

const SEPARATOR: &str = "*";

/// Lowercased, non-blank seed lines in file order (duplicates are kept for the lexicon to drop).
pub fn parse_seed_words(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A single context record: `(head noun, pattern id)`.
pub fn parse_context_record(line_no: usize, line: &str) -> Result<(&str, &str)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let star = tokens
        .iter()
        .position(|t| *t == SEPARATOR)
        .ok_or_else(|| BootstrapError::malformed(line_no, "missing `*` separator token"))?;
    if star == 0 {
        return Err(BootstrapError::malformed(
            line_no,
            "no head noun before the `*` separator",
        ));
    }
    if star + 1 == tokens.len() {
        return Err(BootstrapError::malformed(
            line_no,
            "no pattern identifier after the `*` separator",
        ));
    }
    Ok((tokens[star - 1], tokens[tokens.len() - 1]))
}

/// Build the pattern table from context records. Blank lines are skipped; the first
/// malformed record aborts parsing.
pub fn parse_context_records(text: &str) -> Result<PatternTable> {
    let mut table = PatternTable::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (head_noun, pattern) = parse_context_record(i + 1, line)?;
        table.insert_occurrence(pattern, head_noun);
    }
    Ok(table)
}

pub fn read_seed_words(path: &Path) -> Result<Vec<String>> {
    Ok(parse_seed_words(&fs::read_to_string(path)?))
}

pub fn read_context_records(path: &Path) -> Result<PatternTable> {
    parse_context_records(&fs::read_to_string(path)?)
}

fn name_prefix(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.rfind('-') {
        Some(pos) => name[..pos].to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

/// `<seed prefix>-<context prefix>`, each prefix being the file name up to its last `-`.
///
/// `lists/animals-seeds.txt` + `corpora/muc-contexts.txt` → `animals-muc`.
pub fn derive_trace_stem(seeds_path: &Path, contexts_path: &Path) -> String {
    format!("{}-{}", name_prefix(seeds_path), name_prefix(contexts_path))
}

/// Default trace output path (relative to the working directory).
pub fn derive_trace_path(seeds_path: &Path, contexts_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.trace", derive_trace_stem(seeds_path, contexts_path)))
}
