//! Sample assembly
//!
//!     Joins a scanned file with parsed selector descriptors. Each descriptor is resolved in
//!     order and its lines appended:
//!
//!         - numeric ranges slice the flat line sequence, clamped to the file
//!         - names fetch the region's content lines; unknown names contribute nothing
//!         - no descriptors at all selects the whole file
//!
//!     Lines tagged `skip-sample` are dropped as they are appended, even when selected
//!     explicitly. An assembled sample that ends up empty is an error at the call site rather
//!     than a silent success, see [`Sample::require_lines`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sampler::error::SampleError;
use crate::sampler::scanning::{Line, ScannedFile};
use crate::sampler::selection::{parse_selector, RangeDescriptor};

static SKIP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bskip-sample\b").unwrap());

/// Whether a line carries the `skip-sample` tag
pub fn has_skip_tag(text: &str) -> bool {
    SKIP_TAG.is_match(text)
}

/// An ordered selection of lines borrowed from a scanned file.
///
/// Lines may repeat when the selector asks for overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<'a> {
    lines: Vec<&'a Line>,
    file_line_count: usize,
}

impl<'a> Sample<'a> {
    fn new(file: &ScannedFile) -> Self {
        Sample {
            lines: Vec::new(),
            file_line_count: file.line_count(),
        }
    }

    /// Assemble a sample from an optional selector string.
    pub fn from_selector(file: &'a ScannedFile, selector: Option<&str>) -> Self {
        let ranges = selector.map(parse_selector).unwrap_or_default();
        assemble(file, &ranges)
    }

    fn add(&mut self, lines: impl IntoIterator<Item = &'a Line>) {
        self.lines
            .extend(lines.into_iter().filter(|line| !has_skip_tag(&line.text)));
    }

    pub fn lines(&self) -> &[&'a Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line count of the file the sample was taken from
    pub fn file_line_count(&self) -> usize {
        self.file_line_count
    }

    /// Turn an empty sample into an [`EmptySample`](crate::sampler::error::SampleErrorKind::EmptySample) error.
    pub fn require_lines(self, file: &str, selector: Option<&str>) -> Result<Self, SampleError> {
        if self.is_empty() {
            Err(SampleError::empty(file, selector))
        } else {
            Ok(self)
        }
    }
}

/// Resolve descriptors against a scanned file, in order.
pub fn assemble<'a>(file: &'a ScannedFile, ranges: &[RangeDescriptor]) -> Sample<'a> {
    let mut sample = Sample::new(file);

    if ranges.is_empty() {
        sample.add(file.lines());
        return sample;
    }

    for range in ranges {
        match range {
            RangeDescriptor::Numeric { start, length } => sample.add(file.slice(*start, *length)),
            RangeDescriptor::Named { name } => {
                if !file.has_region(name) {
                    tracing::debug!(%name, "selector names a region that has no lines");
                }
                sample.add(file.region(name));
            }
        }
    }

    tracing::debug!(ranges = ranges.len(), lines = sample.len(), "assembled sample");
    sample
}
