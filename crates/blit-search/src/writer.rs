//! Writer for `var searchData=[...];` files.
//!
//! Output follows the generator's layout exactly so that a file read with
//! [`parse_search_data`](crate::parser::parse_search_data) and written back is
//! byte-identical.

use std::fmt::Write;

use crate::entry::{SearchEntry, SearchTarget};

/// Serialize entries as a search data file.
pub fn write_search_data(entries: &[SearchEntry]) -> String {
    let mut out = String::from("var searchData=\n[\n");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        write_entry(&mut out, entry);
    }
    if !entries.is_empty() {
        out.push('\n');
    }
    out.push_str("];\n");
    out
}

fn write_entry(out: &mut String, entry: &SearchEntry) {
    out.push('[');
    push_quoted(out, &entry.key);
    out.push_str(",[");
    push_quoted(out, &entry.label);
    for target in &entry.targets {
        out.push(',');
        write_target(out, target);
    }
    out.push_str("]]");
}

fn write_target(out: &mut String, target: &SearchTarget) {
    out.push('[');
    push_quoted(out, &target.url);
    let _ = write!(out, ",{},", u8::from(target.local));
    push_quoted(out, &target.scope);
    out.push(']');
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
}
