//! Keyword Bank Loader
//!
//! Reads a keyword file and hands the engine a validated [`KeywordBank`].
//! Runs before any engine exists; any failure stops startup.
//!
//! Two JSON layouts are accepted:
//!
//! ```json
//! [{"word": "apple", "category": "food"}, {"word": "bridge"}]
//! ["apple", "bridge"]
//! ```
//!
//! Record entries may carry a `level` and a `tag`; a [`KeywordFilter`]
//! keeps only the entries whose level and tag were selected, before the
//! bank is validated.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::EngineError;
use crate::game::keywords::KeywordBank;

/// Loader errors.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be read.
    #[error("cannot read keyword file {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File is not a supported JSON layout.
    #[error("invalid keyword JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Words were read but do not form a valid bank.
    #[error("invalid keyword bank: {0}")]
    Bank(#[from] EngineError),
}

/// Level and tag selection applied to record entries.
///
/// `None` accepts every value. An active selection only matches entries
/// that carry that field with one of the selected values, so plain string
/// entries never pass it. Values compare exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    /// Accepted levels (`A1`, `B2`, ..).
    pub levels: Option<BTreeSet<String>>,
    /// Accepted tags.
    pub tags: Option<BTreeSet<String>>,
}

impl KeywordFilter {
    /// Filter that accepts everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// True when neither levels nor tags are restricted.
    pub fn is_open(&self) -> bool {
        self.levels.is_none() && self.tags.is_none()
    }

    fn matches(&self, entry: &KeywordEntry) -> bool {
        let (level, tag) = match entry {
            KeywordEntry::Plain(_) => (None, None),
            KeywordEntry::Record { level, tag, .. } => (level.as_deref(), tag.as_deref()),
        };
        selected(&self.levels, level) && selected(&self.tags, tag)
    }
}

fn selected(allowed: &Option<BTreeSet<String>>, value: Option<&str>) -> bool {
    match allowed {
        None => true,
        Some(allowed) => value.is_some_and(|v| allowed.contains(v)),
    }
}

/// One entry of the keyword file. Extra fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeywordEntry {
    Plain(String),
    Record {
        word: String,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        tag: Option<String>,
    },
}

impl KeywordEntry {
    fn into_word(self) -> String {
        match self {
            KeywordEntry::Plain(word) | KeywordEntry::Record { word, .. } => word,
        }
    }
}

/// Parse a bank from JSON text.
pub fn parse_keywords(json: &str) -> Result<KeywordBank, LoaderError> {
    parse_keywords_filtered(json, &KeywordFilter::all())
}

/// Parse a bank from JSON text, keeping only entries `filter` selects.
///
/// The size check runs on what is left, so a selection that is too narrow
/// fails with [`EngineError::InsufficientBank`].
pub fn parse_keywords_filtered(json: &str, filter: &KeywordFilter) -> Result<KeywordBank, LoaderError> {
    let entries: Vec<KeywordEntry> = serde_json::from_str(json)?;
    let total = entries.len();

    let words: Vec<String> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .map(KeywordEntry::into_word)
        .collect();
    if !filter.is_open() {
        debug!(total, kept = words.len(), "keyword filter applied");
    }

    let bank = KeywordBank::new(words)?;
    Ok(bank)
}

/// Load a bank from a JSON file.
pub fn load_keywords(path: impl AsRef<Path>) -> Result<KeywordBank, LoaderError> {
    load_keywords_filtered(path, &KeywordFilter::all())
}

/// Load a bank from a JSON file, keeping only entries `filter` selects.
pub fn load_keywords_filtered(
    path: impl AsRef<Path>,
    filter: &KeywordFilter,
) -> Result<KeywordBank, LoaderError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_keywords_filtered(&json, filter)
}
