//! Testing utilities
//!
//!     Sample selection is all about exact line positions, and hand-typed strings with the odd
//!     missing newline make for tests that pass for the wrong reason. Tests should therefore:
//!
//!         1. load source text from the fixture files (via [`Fixture`])
//!         2. check results with the fluent assertions (via [`assert_sample`] and
//!            [`assert_rendered`]), which report the offending line on failure
//!
//!     Short inline strings are fine where the test is about the string itself, e.g. a single
//!     delimiter line.
//!
//!     ```rust,ignore
//!     use sampler_core::sampler::testing::{assert_sample, Fixture};
//!
//!     let file = Fixture::Greeter.scan();
//!     let sample = Sample::from_selector(&file, Some("greet"));
//!     assert_sample(&sample).numbers(&[2, 3]).line(0, |line| {
//!         line.contains("hello");
//!     });
//!     ```

use std::path::PathBuf;

use crate::sampler::assembly::Sample;
use crate::sampler::rendering::RenderedLine;
use crate::sampler::scanning::{scan, DelimiterKind, Line, ScannedFile};

/// Fixture files under `tests/fixtures`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixture {
    /// Two small regions in JavaScript
    Greeter,
    /// Nested and overlapping regions in Python
    Nested,
    /// Twenty numbered lines, no delimiters
    Numbered,
    /// Indented HTML with mark and skip tags
    Markup,
}

impl Fixture {
    pub fn file_name(&self) -> &'static str {
        match self {
            Fixture::Greeter => "greeter.js",
            Fixture::Nested => "nested.py",
            Fixture::Numbered => "numbered.txt",
            Fixture::Markup => "markup.html",
        }
    }

    pub fn path(&self) -> PathBuf {
        fixtures_dir().join(self.file_name())
    }

    pub fn source(&self) -> String {
        let path = self.path();
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
    }

    pub fn scan(&self) -> ScannedFile {
        scan(&self.source())
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create an assertion builder for an assembled sample
pub fn assert_sample<'s>(sample: &'s Sample<'_>) -> SampleAssertion<'s> {
    SampleAssertion {
        lines: sample.lines().to_vec(),
        context: "sample".to_string(),
    }
}

pub struct SampleAssertion<'a> {
    lines: Vec<&'a Line>,
    context: String,
}

impl<'a> SampleAssertion<'a> {
    pub fn line_count(self, expected: usize) -> Self {
        assert_eq!(
            self.lines.len(),
            expected,
            "{}: expected {} lines, found {}: {:?}",
            self.context,
            expected,
            self.lines.len(),
            self.texts()
        );
        self
    }

    /// Original file numbers of every line, in order
    pub fn numbers(self, expected: &[usize]) -> Self {
        let actual: Vec<usize> = self.lines.iter().map(|line| line.number).collect();
        assert_eq!(actual, expected, "{}: line numbers differ", self.context);
        self
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn line<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(LineAssertion<'a>),
    {
        let line = self.lines.get(index).copied().unwrap_or_else(|| {
            panic!(
                "{}: no line at index {} (sample has {})",
                self.context,
                index,
                self.lines.len()
            )
        });
        check(LineAssertion {
            line,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    pub fn no_delimiters(self) -> Self {
        for line in &self.lines {
            assert!(
                !line.is_delimiter(),
                "{}: line {} is a delimiter: {:?}",
                self.context,
                line.number,
                line.text
            );
        }
        self
    }
}

pub struct LineAssertion<'a> {
    line: &'a Line,
    context: String,
}

impl LineAssertion<'_> {
    pub fn number(self, expected: usize) -> Self {
        assert_eq!(self.line.number, expected, "{}: line number", self.context);
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.line.text, expected, "{}: text", self.context);
        self
    }

    pub fn contains(self, needle: &str) -> Self {
        assert!(
            self.line.text.contains(needle),
            "{}: expected {:?} to contain {:?}",
            self.context,
            self.line.text,
            needle
        );
        self
    }

    pub fn delimiter(self, expected: DelimiterKind) -> Self {
        assert_eq!(self.line.delimiter, expected, "{}: delimiter kind", self.context);
        self
    }
}

/// Create an assertion builder for rendered output
pub fn assert_rendered(lines: &[RenderedLine]) -> RenderedAssertion<'_> {
    RenderedAssertion { lines }
}

pub struct RenderedAssertion<'a> {
    lines: &'a [RenderedLine],
}

impl RenderedAssertion<'_> {
    pub fn texts(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(actual, expected, "rendered texts differ");
        self
    }

    /// Positions (in the rendered output) of the marked lines
    pub fn marked(self, expected: &[usize]) -> Self {
        let actual: Vec<usize> = self
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.marked)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(actual, expected, "marked lines differ");
        self
    }

    pub fn numbers(self, expected: &[Option<&str>]) -> Self {
        let actual: Vec<Option<&str>> = self
            .lines
            .iter()
            .map(|line| line.number.as_deref())
            .collect();
        assert_eq!(actual, expected, "line numbers differ");
        self
    }
}
