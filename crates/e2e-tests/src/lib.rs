//! End-to-end test infrastructure for blit.
//!
//! Provides a shared TestHarness that lays out a documentation `search/`
//! directory on disk, plus helpers for checking the search data against the
//! raster library it documents.

use std::path::{Path, PathBuf};

use blit_types::Settings;

/// The generated search data for keys starting with `r`.
pub const ALL_D: &str = include_str!("../../blit-search/tests/fixtures/all_d.js");

/// A second, smaller file so directory loads span more than one file.
pub const ALL_2: &str = "var searchData=\n[\n  ['blit_5ffill_0',['blit_fill',['../rop2_8h.html#a3c1e',1,'']]],\n  ['blit_5frop2_1',['blit_rop2',['../rop2_8h.html#a9d0b',1,'']]]\n];\n";

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// The `search/` directory
    pub search_dir: PathBuf,
}

impl TestHarness {
    /// Create an empty `search/` directory.
    pub fn new() -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let search_dir = temp_dir.path().join("search");
        std::fs::create_dir_all(&search_dir).expect("Failed to create search dir");
        Self {
            _temp_dir: temp_dir,
            search_dir,
        }
    }

    /// Harness holding `all_2.js` and `all_d.js`, plus a non-index file the
    /// loader must skip.
    pub fn with_fixtures() -> Self {
        let harness = Self::new();
        harness.write("all_2.js", ALL_2);
        harness.write("all_d.js", ALL_D);
        harness.write("search.js", "function SearchBox() {}\n");
        harness
    }

    /// Write a file into the search directory, returning its path.
    pub fn write(&self, name: &str, text: &str) -> PathBuf {
        let path = self.search_dir.join(name);
        std::fs::write(&path, text).expect("Failed to write fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.search_dir.join(name)
    }

    /// Settings pointing at this harness's search directory.
    pub fn settings(&self) -> Settings {
        settings_for(&self.search_dir)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Default settings with `index_path` replaced.
pub fn settings_for(path: &Path) -> Settings {
    Settings {
        index_path: path.to_string_lossy().into_owned(),
        ..Settings::default()
    }
}

/// Evaluate a C bitwise expression over `D` and `S` on the four-bit
/// truth-table operands (S = 1100, D = 1010).
///
/// Understands `~ & ^ |`, parentheses and hex or decimal literals with an
/// optional `U` suffix, with C precedence.
pub fn eval_c_expr(expr: &str) -> Result<u8, String> {
    let tokens: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parser = ExprParser { tokens, pos: 0 };
    let value = parser.or()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!("trailing input in '{expr}'"));
    }
    Ok(value & 0x0f)
}

struct ExprParser {
    tokens: Vec<char>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<u8, String> {
        let mut value = self.xor()?;
        while self.eat('|') {
            value |= self.xor()?;
        }
        Ok(value)
    }

    fn xor(&mut self) -> Result<u8, String> {
        let mut value = self.and()?;
        while self.eat('^') {
            value ^= self.and()?;
        }
        Ok(value)
    }

    fn and(&mut self) -> Result<u8, String> {
        let mut value = self.unary()?;
        while self.eat('&') {
            value &= self.unary()?;
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<u8, String> {
        if self.eat('~') {
            return Ok(!self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<u8, String> {
        match self.peek() {
            Some('D') => {
                self.pos += 1;
                Ok(0b1010)
            }
            Some('S') => {
                self.pos += 1;
                Ok(0b1100)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.or()?;
                if !self.eat(')') {
                    return Err("missing ')'".to_string());
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() => self.literal(),
            other => Err(format!("unexpected {other:?} at {}", self.pos)),
        }
    }

    fn literal(&mut self) -> Result<u8, String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let text: String = self.tokens[start..self.pos].iter().collect();
        let digits = text.trim_end_matches(|c: char| c == 'U' || c == 'u');
        let parsed = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => digits.parse::<u64>(),
        };
        parsed
            .map(|v| (v & 0xff) as u8)
            .map_err(|e| format!("bad literal '{text}': {e}"))
    }
}
