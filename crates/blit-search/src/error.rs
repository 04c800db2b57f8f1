//! Search data error types.

use thiserror::Error;

/// Errors that can occur while loading or querying search data.
#[derive(Debug, Error)]
pub enum SearchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The transcoded array literal is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not a `var searchData=[...];` literal
    #[error("Syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// An entry does not have the `[key, [label, [url, flag, scope], ...]]` shape
    #[error("Entry {entry}: {message}")]
    Shape { entry: usize, message: String },

    /// Key does not follow the `<term>_<ordinal>` encoding
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// No search data at the given path
    #[error("Index not found at path: {0}")]
    IndexNotFound(String),

    /// Exact key lookup failed
    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

impl SearchError {
    pub(crate) fn shape(entry: usize, message: impl Into<String>) -> Self {
        SearchError::Shape {
            entry,
            message: message.into(),
        }
    }
}
