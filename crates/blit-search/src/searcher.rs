//! Query matching over a loaded index.
//!
//! Mirrors the documentation search box: the query is trimmed and
//! lowercased, then compared with each key's term. Hits keep index order.

use serde::Serialize;
use tracing::info;

use crate::entry::{SearchEntry, SearchTarget};
use crate::error::SearchError;
use crate::index::SearchIndex;
use crate::key::{decode_term, encode_term, split_key};

/// How the query is compared with key terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Prefix,
    Substring,
}

/// Search options for match mode and result limit.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub mode: MatchMode,
    /// Maximum results to return
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self {
            mode: MatchMode::Prefix,
            limit: 50,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn substring() -> Self {
        Self::new().with_mode(MatchMode::Substring)
    }
}

/// One matching entry.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub key: &'a str,
    /// Raw label as stored
    pub label: &'a str,
    /// Label as plain text
    pub display: String,
    pub targets: &'a [SearchTarget],
    /// More than one target: children render under the label
    pub grouped: bool,
}

impl<'a> SearchHit<'a> {
    fn new(entry: &'a SearchEntry) -> Self {
        Self {
            key: &entry.key,
            label: &entry.label,
            display: entry.display_label(),
            targets: &entry.targets,
            grouped: entry.is_grouped(),
        }
    }
}

enum Term<'a> {
    Decoded(String),
    /// Key did not decode; compare in encoded form
    Raw(&'a str),
}

/// Searcher over a borrowed index. Key terms are decoded once up front.
pub struct Searcher<'a> {
    index: &'a SearchIndex,
    terms: Vec<Term<'a>>,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        let terms = index
            .iter()
            .map(|entry| match split_key(&entry.key) {
                Ok((encoded, _)) => match decode_term(encoded) {
                    Ok(term) => Term::Decoded(term),
                    Err(_) => Term::Raw(encoded),
                },
                Err(_) => Term::Raw(&entry.key),
            })
            .collect();
        Self { index, terms }
    }

    /// Search with a query string. An empty query matches nothing.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit<'a>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let encoded = encode_term(&query);

        let results: Vec<SearchHit<'a>> = self
            .index
            .iter()
            .zip(&self.terms)
            .filter(|(_, term)| match term {
                Term::Decoded(term) => matches(options.mode, term, &query),
                Term::Raw(raw) => matches(options.mode, raw, &encoded),
            })
            .take(options.limit)
            .map(|(entry, _)| SearchHit::new(entry))
            .collect();

        info!(
            query = query.as_str(),
            mode = ?options.mode,
            results = results.len(),
            "Index search complete"
        );
        results
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Result<SearchHit<'a>, SearchError> {
        self.index
            .get(key)
            .map(SearchHit::new)
            .ok_or_else(|| SearchError::KeyNotFound(key.to_string()))
    }
}

fn matches(mode: MatchMode, term: &str, query: &str) -> bool {
    match mode {
        MatchMode::Prefix => term.starts_with(query),
        MatchMode::Substring => term.contains(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> SearchIndex {
        SearchIndex::parse(concat!(
            "[['reference_2',['API Reference',['../index.html#autotoc_md9',1,'']]],",
            "['region_4',['region',['../index.html#autotoc_md13',1,'Copy a 32×32 region'],['../index.html#autotoc_md14',1,'Invert a region']]],",
            "['rgn1_2eh_8',['rgn1.h',['../rgn1_8h.html',1,'']]],",
            "['rop2_2eh_10',['rop2.h',['../rop2_8h.html',1,'']]],",
            "['bad-key',['Odd',['odd.html',1,'']]]]"
        ))
        .unwrap()
    }

    #[test]
    fn test_prefix_search() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let keys: Vec<_> = searcher
            .search("re", &SearchOptions::new())
            .iter()
            .map(|h| h.key)
            .collect();
        assert_eq!(keys, vec!["reference_2", "region_4"]);
    }

    #[test]
    fn test_query_is_case_and_space_insensitive() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let hits = searcher.search("  ROP2.H ", &SearchOptions::new());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "rop2.h");
        assert_eq!(hits[0].targets[0].url, "../rop2_8h.html");
        assert!(!hits[0].grouped);
    }

    #[test]
    fn test_substring_search() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let hits = searcher.search(".h", &SearchOptions::substring());
        let keys: Vec<_> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec!["rgn1_2eh_8", "rop2_2eh_10"]);

        let prefix = searcher.search(".h", &SearchOptions::new());
        assert!(prefix.is_empty());
    }

    #[test]
    fn test_grouped_hit() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let hits = searcher.search("region", &SearchOptions::new());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].grouped);
        assert_eq!(hits[0].targets[1].parent(), Some("Invert a region"));
    }

    #[test]
    fn test_limit() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let hits = searcher.search("r", &SearchOptions::new().with_limit(2));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, "reference_2");
    }

    #[test]
    fn test_empty_query() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        assert!(searcher.search("", &SearchOptions::new()).is_empty());
        assert!(searcher.search("   ", &SearchOptions::new()).is_empty());
    }

    #[test]
    fn test_malformed_key_still_searchable() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        let hits = searcher.search("bad-", &SearchOptions::new());
        assert!(hits.is_empty());
        let hits = searcher.search("bad", &SearchOptions::new());
        assert_eq!(hits[0].key, "bad-key");
    }

    #[test]
    fn test_exact_get() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        assert_eq!(searcher.get("rgn1_2eh_8").unwrap().display, "rgn1.h");
        assert!(matches!(
            searcher.get("rgn1"),
            Err(SearchError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let index = sample_index();
        let searcher = Searcher::new(&index);
        assert!(searcher.search("zebra", &SearchOptions::new()).is_empty());
    }
}
