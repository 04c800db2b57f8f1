//! Search data records.
//!
//! One entry per key: `[key, [label, [url, flag, scope], ...]]`.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::key::{decode_key, DecodedKey};
use crate::label::{display_text, Scope};

/// One link target of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTarget {
    /// Page path relative to the search directory, with optional `#anchor`
    pub url: String,
    /// Anchor flag: true (`1`) for links inside this documentation set,
    /// false (`0`) for external tag-file links
    pub local: bool,
    /// Grouping text shown under the label; empty when there is none
    pub scope: String,
}

impl SearchTarget {
    pub fn new(url: impl Into<String>, local: bool, scope: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            local,
            scope: scope.into(),
        }
    }

    /// The grouping label, if any.
    pub fn parent(&self) -> Option<&str> {
        (!self.scope.is_empty()).then_some(self.scope.as_str())
    }

    /// Page part of the URL.
    pub fn page(&self) -> &str {
        self.url.split_once('#').map_or(self.url.as_str(), |(page, _)| page)
    }

    /// Anchor fragment without the `#`.
    pub fn anchor(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, anchor)| anchor)
    }

    /// Parsed scope (symbol and defining file).
    pub fn parsed_scope(&self) -> Option<Scope> {
        Scope::parse(&self.scope)
    }
}

/// A key with its label and one or more targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub key: String,
    pub label: String,
    pub targets: Vec<SearchTarget>,
}

impl SearchEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, targets: Vec<SearchTarget>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            targets,
        }
    }

    /// Decode the key into its readable term and ordinal.
    pub fn decoded_key(&self) -> Result<DecodedKey, SearchError> {
        decode_key(&self.key)
    }

    /// Label as plain text.
    pub fn display_label(&self) -> String {
        display_text(&self.label)
    }

    /// True when the key maps to several targets that render under one label.
    pub fn is_grouped(&self) -> bool {
        self.targets.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url_parts() {
        let target = SearchTarget::new("../index.html#autotoc_md13", true, "");
        assert_eq!(target.page(), "../index.html");
        assert_eq!(target.anchor(), Some("autotoc_md13"));
        assert_eq!(target.parent(), None);

        let page_only = SearchTarget::new("../rop2_8h.html", true, "");
        assert_eq!(page_only.page(), "../rop2_8h.html");
        assert_eq!(page_only.anchor(), None);
    }

    #[test]
    fn test_entry_grouping() {
        let entry = SearchEntry::new(
            "region_4",
            "region",
            vec![
                SearchTarget::new("../index.html#autotoc_md13", true, "Copy a 32×32 region"),
                SearchTarget::new("../index.html#autotoc_md14", true, "Invert a region"),
            ],
        );
        assert!(entry.is_grouped());
        assert_eq!(entry.targets[1].parent(), Some("Invert a region"));
        assert_eq!(entry.decoded_key().unwrap().ordinal, 4);
    }
}
