//! Line scanning
//!
//!     Turns raw file content into a [`ScannedFile`]: the flat, ordered sequence of every line
//!     plus the mapping from region name to the content lines inside that region.
//!
//!     `\n` and `\r\n` terminators are treated the same. A trailing terminator does not create
//!     an extra empty line at the end.
//!
//!     Delimiter lines are kept in the flat sequence (tagged with their [`DelimiterKind`]) but
//!     never become members of a region. Scanning is pure, so a scanned file can be built once
//!     per file identifier and shared between every sample taken from it.

pub mod delimiters;
pub mod line;
pub mod regions;

use std::collections::BTreeMap;

pub use delimiters::{classify_line, Delimiter};
pub use line::{DelimiterKind, Line};
pub use regions::RegionTracker;

/// A file split into lines, with its named regions resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedFile {
    lines: Vec<Line>,
    regions: BTreeMap<String, Vec<usize>>,
}

impl ScannedFile {
    /// Every line of the file, in order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines at zero-based `start .. start + length`, clamped to the file.
    pub fn slice(&self, start: usize, length: usize) -> &[Line] {
        let start = start.min(self.lines.len());
        let end = start.saturating_add(length).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Content lines of a region, in file order. Unknown names yield nothing.
    pub fn region(&self, name: &str) -> impl Iterator<Item = &Line> + '_ {
        self.regions
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&index| &self.lines[index])
    }

    pub fn has_region(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// Names of all regions that received at least one line, sorted
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }
}

/// Scan raw file content.
pub fn scan(content: &str) -> ScannedFile {
    let mut lines = Vec::new();
    let mut tracker = RegionTracker::new();

    for (index, text) in content.lines().enumerate() {
        let delimiter = classify_line(text);
        let kind = delimiter.map_or(DelimiterKind::None, |d| d.kind());
        match delimiter {
            Some(delimiter) => tracker.apply(delimiter),
            None => tracker.record(index),
        }
        lines.push(Line::new(index + 1, text, kind));
    }

    if !tracker.open_regions().is_empty() {
        tracing::debug!(
            open = ?tracker.open_regions(),
            "regions still open at end of file"
        );
    }

    let regions = tracker.finish();
    tracing::debug!(lines = lines.len(), regions = regions.len(), "scanned file");

    ScannedFile { lines, regions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(lines: impl Iterator<Item = &'a Line>) -> Vec<&'a str> {
        lines.map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_scan_splits_both_terminators() {
        let file = scan("a\r\nb\nc\n");
        assert_eq!(texts(file.lines().iter()), vec!["a", "b", "c"]);
        assert_eq!(file.lines()[2].number, 3);
    }

    #[test]
    fn test_scan_empty_content() {
        let file = scan("");
        assert_eq!(file.line_count(), 0);
        assert_eq!(file.region_names().count(), 0);
    }

    #[test]
    fn test_delimiters_stay_in_flat_lines() {
        let file = scan("// sample(greet)\nconsole.log(\"hi\");\n// end-sample\ndone();\n");
        assert_eq!(file.line_count(), 4);
        assert_eq!(file.lines()[0].delimiter, DelimiterKind::RegionStart);
        assert_eq!(file.lines()[1].delimiter, DelimiterKind::None);
        assert_eq!(file.lines()[2].delimiter, DelimiterKind::RegionEnd);
        assert_eq!(texts(file.region("greet")), vec!["console.log(\"hi\");"]);
    }

    #[test]
    fn test_overlapping_regions() {
        let file = scan("sample(A)\nsample(B)\ncontent\nend-sample(A)\nend-sample(B)\n");
        assert_eq!(texts(file.region("A")), vec!["content"]);
        assert_eq!(texts(file.region("B")), vec!["content"]);
    }

    #[test]
    fn test_unmatched_named_end() {
        let file = scan("end-sample(X)\nfoo");
        assert_eq!(texts(file.lines().iter()), vec!["end-sample(X)", "foo"]);
        assert_eq!(file.region("X").count(), 0);
        assert!(!file.has_region("X"));
    }

    #[test]
    fn test_region_names_are_case_sensitive() {
        let file = scan("# sample(Foo)\nx\n# end-sample\n");
        assert!(file.has_region("Foo"));
        assert!(!file.has_region("foo"));
    }

    #[test]
    fn test_slice_clamps() {
        let file = scan("1\n2\n3\n");
        assert_eq!(texts(file.slice(1, 10).iter()), vec!["2", "3"]);
        assert!(file.slice(5, 2).is_empty());
        assert!(file.slice(0, 0).is_empty());
        assert_eq!(file.slice(0, usize::MAX).len(), 3);
    }
}
