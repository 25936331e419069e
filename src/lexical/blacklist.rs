// Banned terms, canonicalized once and never mutated afterwards.
//
// Entries are run through the same normalize + deobfuscate pipeline as the
// comments they are compared against, so "otário" and "otario" collapse into
// one entry and casing or accents in a term file don't matter.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::text::canonicalize;

/// Built-in terms, Portuguese and English. Extend with a term file rather than
/// editing this list in place.
pub const DEFAULT_TERMS: &[&str] = &[
    // Portuguese
    "caralho",
    "porra",
    "foda",
    "fode",
    "fodasse",
    "puta",
    "merda",
    "burro",
    "idiota",
    "otario",
    "otário",
    "bastardo",
    "viado",
    "filho da puta",
    "fdp",
    // English
    "fuck",
    "shit",
    "bitch",
    "bastard",
    "asshole",
    "motherfucker",
];

/// An immutable set of canonical banned tokens and phrases.
///
/// Share it behind an `Arc`; nothing on the request path mutates it.
#[derive(Debug, Clone)]
pub struct Blacklist {
    // BTreeSet keeps iteration order stable, so the substring pass reports
    // the same entry for the same input every time.
    entries: BTreeSet<String>,
}

impl Blacklist {
    /// Build a blacklist from raw terms. Terms that canonicalize to nothing
    /// (pure punctuation, empty lines) are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = terms
            .into_iter()
            .map(|t| canonicalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { entries }
    }

    /// Return a new blacklist with `terms` added to the current entries.
    pub fn with_terms<I, S>(self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.entries;
        entries.extend(
            terms
                .into_iter()
                .map(|t| canonicalize(t.as_ref()))
                .filter(|t| !t.is_empty()),
        );
        Self { entries }
    }

    /// Built-in terms plus the contents of an optional term file.
    pub fn load(extra_file: Option<&Path>) -> Result<Self> {
        let blacklist = Self::default();
        match extra_file {
            Some(path) => {
                let terms = load_terms(path)?;
                debug!(path = %path.display(), terms = terms.len(), "Loaded extra blacklist terms");
                Ok(blacklist.with_terms(terms))
            }
            None => Ok(blacklist),
        }
    }

    /// Exact membership test against a canonical token or phrase.
    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS)
    }
}

/// Read a term file: one term or phrase per line, `#` starts a comment line,
/// blank lines are skipped.
pub fn load_terms(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read blacklist file {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
