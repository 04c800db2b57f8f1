//! Reader for `var searchData=[...];` files.
//!
//! The array literal uses single-quoted JavaScript strings. It is transcoded
//! to JSON and decoded with serde_json, then checked against the entry shape
//! `[key, [label, [url, flag, scope], ...]]`.

use serde_json::Value;
use tracing::debug;

use crate::entry::{SearchEntry, SearchTarget};
use crate::error::SearchError;

/// Parse the contents of a search data file.
///
/// Accepts the full `var searchData=[...];` assignment or a bare array literal.
pub fn parse_search_data(text: &str) -> Result<Vec<SearchEntry>, SearchError> {
    let literal = array_literal(text)?;
    let json = transcode(literal.body, literal.offset)?;
    let value: Value = serde_json::from_str(&json)?;
    let items = value.as_array().ok_or_else(|| SearchError::Syntax {
        offset: literal.offset,
        message: "expected an array".to_string(),
    })?;

    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| entry_from_value(i, item))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(entries = entries.len(), "Parsed search data");
    Ok(entries)
}

struct Literal<'a> {
    body: &'a str,
    offset: usize,
}

/// Locate the array literal, skipping an optional `var name =` prefix and a
/// trailing semicolon.
fn array_literal(text: &str) -> Result<Literal<'_>, SearchError> {
    let mut start = text.len() - text.trim_start().len();
    if text[start..].starts_with("var") {
        let eq = text[start..].find('=').ok_or_else(|| SearchError::Syntax {
            offset: start,
            message: "missing '=' after var".to_string(),
        })?;
        let after = start + eq + 1;
        start = after + (text[after..].len() - text[after..].trim_start().len());
    }
    let body = text[start..].trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    if !body.starts_with('[') {
        return Err(SearchError::Syntax {
            offset: start,
            message: "expected '['".to_string(),
        });
    }
    Ok(Literal {
        body,
        offset: start,
    })
}

/// Rewrite single-quoted strings as JSON strings. Double-quoted strings pass
/// through unchanged.
fn transcode(body: &str, base: usize) -> Result<String, SearchError> {
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    let mut chars = body.char_indices();
    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' => {
                out.push('"');
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\'' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, '\'')) => out.push('\''),
                            Some((_, e)) => {
                                out.push('\\');
                                out.push(e);
                            }
                            None => break,
                        },
                        '"' => out.push_str("\\\""),
                        c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
                        c => out.push(c),
                    }
                }
                if !closed {
                    return Err(SearchError::Syntax {
                        offset: base + pos,
                        message: "unterminated string".to_string(),
                    });
                }
                out.push('"');
            }
            '"' => {
                out.push('"');
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    out.push(c);
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            if let Some((_, e)) = chars.next() {
                                out.push(e);
                            }
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(SearchError::Syntax {
                        offset: base + pos,
                        message: "unterminated string".to_string(),
                    });
                }
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

fn entry_from_value(index: usize, value: &Value) -> Result<SearchEntry, SearchError> {
    let pair = value
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| SearchError::shape(index, "expected [key, [label, targets...]]"))?;
    let key = pair[0]
        .as_str()
        .ok_or_else(|| SearchError::shape(index, "key must be a string"))?;
    let group = pair[1]
        .as_array()
        .ok_or_else(|| SearchError::shape(index, "value must be an array"))?;
    let (label, targets) = group
        .split_first()
        .ok_or_else(|| SearchError::shape(index, "value is empty"))?;
    let label = label
        .as_str()
        .ok_or_else(|| SearchError::shape(index, "label must be a string"))?;

    let targets = targets
        .iter()
        .map(|t| target_from_value(index, t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchEntry::new(key, label, targets))
}

fn target_from_value(index: usize, value: &Value) -> Result<SearchTarget, SearchError> {
    let parts = value
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| SearchError::shape(index, "target must be [url, flag, scope]"))?;
    let url = parts[0]
        .as_str()
        .ok_or_else(|| SearchError::shape(index, "target url must be a string"))?;
    let local = match parts[1].as_u64() {
        Some(1) => true,
        Some(0) => false,
        _ => return Err(SearchError::shape(index, "target flag must be 0 or 1")),
    };
    let scope = parts[2]
        .as_str()
        .ok_or_else(|| SearchError::shape(index, "target scope must be a string"))?;
    Ok(SearchTarget::new(url, local, scope))
}
