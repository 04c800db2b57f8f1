//! Display helpers for labels and scopes.
//!
//! Labels and scopes are stored as HTML fragments: entities such as `&lt;`
//! and `&#160;` appear verbatim. The raw text is kept untouched for
//! re-serialization; these helpers produce plain text for terminals.

use serde::Serialize;

/// Decode HTML entities and drop inline tags.
///
/// `Raster operations (&lt;tt&gt;blit_rop2&lt;/tt&gt;)` becomes
/// `Raster operations (blit_rop2)`. A non-breaking space becomes a plain
/// space.
pub fn display_text(raw: &str) -> String {
    strip_tags(&decode_entities(raw))
}

/// Decode the named entities that appear in generated labels plus numeric
/// character references. Unknown entities are left as written.
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => match decode_entity(&tail[1..semi]) {
                Some(c) => {
                    out.push(c);
                    rest = &tail[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    let c = match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            if code == 0xa0 {
                ' '
            } else {
                char::from_u32(code)?
            }
        }
    };
    Some(c)
}

/// Remove `<tag>` and `</tag>` markup. A `<` not followed by a letter or
/// `/letter` is ordinary text.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt + 1..];
        let name = tail.strip_prefix('/').unwrap_or(tail);
        let starts_tag = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        match tail.find('>') {
            Some(gt) if starts_tag => rest = &tail[gt + 1..],
            _ => {
                out.push('<');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// A target scope split into symbol and defining file.
///
/// Scopes of grouped entries read `ROP_REV_POLISH(DSno, D|~S):&#160;rop2.c`.
/// Headings carry a free-text scope such as `Copy a 32×32 region` with no
/// file part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub symbol: String,
    pub file: Option<String>,
}

impl Scope {
    /// Parse a raw scope string. Returns `None` for an empty scope.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let scope = match raw.rsplit_once(":&#160;") {
            Some((symbol, file)) if !file.is_empty() => Scope {
                symbol: display_text(symbol),
                file: Some(display_text(file)),
            },
            _ => Scope {
                symbol: display_text(raw),
                file: None,
            },
        };
        Some(scope)
    }

    /// Split a macro-style symbol `NAME(arg, arg)` into name and arguments.
    pub fn call(&self) -> Option<(&str, Vec<&str>)> {
        let open = self.symbol.find('(')?;
        let inner = self.symbol[open + 1..].strip_suffix(')')?;
        let args = inner.split(',').map(str::trim).collect();
        Some((&self.symbol[..open], args))
    }
}
