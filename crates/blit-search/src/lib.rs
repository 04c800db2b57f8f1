//! # blit-search
//!
//! Reader, writer and query engine for the generated documentation search
//! data (`search/all_*.js`) of the blit raster library.
//!
//! A search data file is an ordered list of
//! `[key, [label, [url, flag, scope], ...]]` records assigned to
//! `var searchData`. This crate:
//! - parses it into [`SearchIndex`] without losing anything needed to write it
//!   back byte for byte
//! - validates the data-shape invariants (unique non-empty keys, non-empty URLs)
//! - decodes keys and labels for display
//! - answers prefix and substring queries the way the documentation search box does
//!
//! ```
//! use blit_search::{SearchIndex, SearchOptions, Searcher};
//!
//! let index = SearchIndex::parse(
//!     "var searchData=\n[\n  ['rop2_2eh_10',['rop2.h',['../rop2_8h.html',1,'']]]\n];\n",
//! )
//! .unwrap();
//! let hits = Searcher::new(&index).search("rop2", &SearchOptions::new());
//! assert_eq!(hits[0].targets[0].url, "../rop2_8h.html");
//! ```

pub mod entry;
pub mod error;
pub mod index;
pub mod key;
pub mod label;
pub mod parser;
pub mod searcher;
pub mod validate;
pub mod writer;

pub use entry::{SearchEntry, SearchTarget};
pub use error::SearchError;
pub use index::{search_data_files, SearchIndex};
pub use key::{decode_key, encode_term, DecodedKey};
pub use label::{display_text, Scope};
pub use parser::parse_search_data;
pub use searcher::{MatchMode, SearchHit, SearchOptions, Searcher};
pub use validate::{validate, Issue, IssueKind, Severity, ValidationReport};
pub use writer::write_search_data;
