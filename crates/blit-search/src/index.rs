//! Loaded search data.
//!
//! A `SearchIndex` is immutable once built. It can come from one
//! `all_*.js` file or from the whole `search/` directory, where the generator
//! splits entries into one file per leading character.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::entry::SearchEntry;
use crate::error::SearchError;
use crate::parser::parse_search_data;
use crate::validate::{validate, ValidationReport};
use crate::writer::write_search_data;

/// An ordered, immutable sequence of search entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn from_entries(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    /// Parse search data text.
    pub fn parse(text: &str) -> Result<Self, SearchError> {
        Ok(Self::from_entries(parse_search_data(text)?))
    }

    /// Load a single file, or every `all_*.js` file when `path` is a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else if path.is_file() {
            Self::load(path)
        } else {
            Err(SearchError::IndexNotFound(path.display().to_string()))
        }
    }

    /// Load one search data file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let index = Self::parse(&text)?;
        debug!(path = %path.display(), entries = index.len(), "Loaded search data file");
        Ok(index)
    }

    /// Load and concatenate every `all_<hex>.js` file in a directory, in
    /// ascending order of the hex suffix.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, SearchError> {
        let dir = dir.as_ref();
        let files = search_data_files(dir)?;

        let mut entries = Vec::new();
        for path in &files {
            entries.extend(Self::load(path)?.entries);
        }
        info!(
            dir = %dir.display(),
            files = files.len(),
            entries = entries.len(),
            "Loaded search data directory"
        );
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&SearchEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Total number of link targets across all entries.
    pub fn target_count(&self) -> usize {
        self.entries.iter().map(|e| e.targets.len()).sum()
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.entries)
    }

    /// Serialize back to search data text.
    pub fn to_search_data(&self) -> String {
        write_search_data(&self.entries)
    }

    /// Export the entries as pretty JSON.
    pub fn to_json(&self) -> Result<String, SearchError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a SearchEntry;
    type IntoIter = std::slice::Iter<'a, SearchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The `all_<hex>.js` files of a search directory, sorted by hex suffix.
/// Other files (`functions_0.js`, `search.js`, ...) are skipped.
pub fn search_data_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, SearchError> {
    let dir = dir.as_ref();
    let mut files: Vec<(u32, PathBuf)> = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let path = dir_entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(suffix) = name.strip_prefix("all_").and_then(|n| n.strip_suffix(".js")) else {
            continue;
        };
        if let Ok(order) = u32::from_str_radix(suffix, 16) {
            files.push((order, path));
        }
    }
    if files.is_empty() {
        return Err(SearchError::IndexNotFound(format!(
            "{}: no all_*.js files",
            dir.display()
        )));
    }
    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}
