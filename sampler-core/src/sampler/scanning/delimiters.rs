//! Delimiter Classification
//!
//! Recognizes the three region delimiters. Matching is line oriented and does not care about
//! the host language: any run of whitespace and `/`, `*`, `#` characters may precede the
//! keyword, which covers `//`, `/* */`, `#` and friends without knowing which one the file
//! actually uses.
//!
//! Patterns are tried in this order (important for correctness):
//! 1. `sample(NAME)`
//! 2. `end-sample(NAME)`
//! 3. `end-sample`

use once_cell::sync::Lazy;
use regex::Regex;

use super::line::DelimiterKind;

static REGION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[/*#\s]*sample\(([^)\r\n]+)\)").unwrap());

static REGION_END_NAMED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[/*#\s]*end-sample\(([^)\r\n]+)\)").unwrap());

static REGION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[/*#\s]*end-sample").unwrap());

/// A recognized delimiter, borrowing the region name from the line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter<'a> {
    Start(&'a str),
    EndNamed(&'a str),
    End,
}

impl Delimiter<'_> {
    pub fn kind(&self) -> DelimiterKind {
        match self {
            Delimiter::Start(_) => DelimiterKind::RegionStart,
            Delimiter::EndNamed(_) => DelimiterKind::RegionEndNamed,
            Delimiter::End => DelimiterKind::RegionEnd,
        }
    }
}

/// Classify a single line. Returns `None` for content lines.
pub fn classify_line(text: &str) -> Option<Delimiter<'_>> {
    if let Some(name) = capture_name(&REGION_START, text) {
        return Some(Delimiter::Start(name));
    }
    if let Some(name) = capture_name(&REGION_END_NAMED, text) {
        return Some(Delimiter::EndNamed(name));
    }
    if REGION_END.is_match(text) {
        return Some(Delimiter::End);
    }
    None
}

fn capture_name<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}
