//! Scanned line types
//!
//!     A scanned file is a flat sequence of lines. Every physical line of the source shows up
//!     exactly once, delimiter lines included, so that numeric selectors and original line
//!     numbers stay positionally accurate. Lines are never mutated after scanning; every later
//!     stage borrows them.

use std::fmt;

/// The structural role of a line, as recognized by the delimiter classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DelimiterKind {
    /// Regular content
    None,
    /// `sample(NAME)`
    RegionStart,
    /// `end-sample`
    RegionEnd,
    /// `end-sample(NAME)`
    RegionEndNamed,
}

impl DelimiterKind {
    pub fn is_delimiter(&self) -> bool {
        !matches!(self, DelimiterKind::None)
    }
}

impl fmt::Display for DelimiterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DelimiterKind::None => "content",
            DelimiterKind::RegionStart => "region-start",
            DelimiterKind::RegionEnd => "region-end",
            DelimiterKind::RegionEndNamed => "region-end-named",
        };
        write!(f, "{}", name)
    }
}

/// One physical line of a scanned file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// 1-based position in the original file
    pub number: usize,
    /// Raw text, without the line terminator
    pub text: String,
    pub delimiter: DelimiterKind,
}

impl Line {
    pub fn new(number: usize, text: impl Into<String>, delimiter: DelimiterKind) -> Self {
        Line {
            number,
            text: text.into(),
            delimiter,
        }
    }

    pub fn content(number: usize, text: impl Into<String>) -> Self {
        Line::new(number, text, DelimiterKind::None)
    }

    pub fn is_delimiter(&self) -> bool {
        self.delimiter.is_delimiter()
    }

    /// True for empty and whitespace-only lines
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
