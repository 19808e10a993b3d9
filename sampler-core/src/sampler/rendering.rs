//! Rendering
//!
//!     Turns an assembled [`Sample`] into display lines. The steps run in a fixed order:
//!
//!         1. drop delimiter lines (optional)
//!         2. drop lines at explicit skip offsets
//!         3. stop if nothing survived
//!         4. remove common indentation (optional)
//!         5. assign line numbers
//!         6. mark lines, by inline tag or by offset
//!
//!     Skip and mark offsets are zero-based positions in the assembled sample *before* any
//!     line is dropped, so they address the lines the way the selector produced them.
//!
//!     The output is a list of [`RenderedLine`]s. Consecutive lines are meant to be joined
//!     with a single newline; no line carries its own terminator, see
//!     [`join_lines`].

pub mod line_numbers;
pub mod marks;

use std::borrow::Cow;

use serde::Serialize;

pub use line_numbers::LineNumberMode;
pub use marks::strip_mark_tag;

use crate::sampler::assembly::Sample;
use crate::sampler::scanning::Line;
use crate::sampler::selection::OffsetSet;
use line_numbers::LineNumbering;

/// Per-render decoration options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub remove_indentation: bool,
    pub line_numbers: LineNumberMode,
    /// Zero-based sample offsets to highlight
    pub marked: OffsetSet,
    pub skip_delimiters: bool,
    /// Zero-based sample offsets to leave out
    pub skip: OffsetSet,
}

/// One line ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    /// Padded display number, absent when numbering is off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub marked: bool,
    pub text: String,
}

impl RenderedLine {
    pub fn plain(text: impl Into<String>) -> Self {
        RenderedLine {
            number: None,
            marked: false,
            text: text.into(),
        }
    }
}

/// Render a sample. An empty result means every line was filtered out.
pub fn render(sample: &Sample<'_>, options: &RenderOptions) -> Vec<RenderedLine> {
    let surviving: Vec<(usize, &Line)> = sample
        .lines()
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, line)| !(options.skip_delimiters && line.is_delimiter()))
        .filter(|(offset, _)| !options.skip.contains(*offset))
        .collect();

    if surviving.is_empty() {
        return Vec::new();
    }

    let indentation = if options.remove_indentation {
        common_indentation(surviving.iter().map(|(_, line)| *line))
    } else {
        0
    };
    let numbering = LineNumbering::new(
        options.line_numbers,
        surviving.len(),
        sample.file_line_count(),
    );

    let rendered: Vec<RenderedLine> = surviving
        .iter()
        .enumerate()
        .map(|(position, (offset, line))| {
            let text = strip_chars(&line.text, indentation);
            let (marked, text) = match strip_mark_tag(text) {
                Some(stripped) => (true, stripped),
                None => (options.marked.contains(*offset), Cow::Borrowed(text)),
            };
            RenderedLine {
                number: numbering.number(position, line.number),
                marked,
                text: text.into_owned(),
            }
        })
        .collect();

    tracing::debug!(
        sample = sample.len(),
        rendered = rendered.len(),
        indentation,
        "rendered sample"
    );
    rendered
}

/// Join rendered line texts with newlines, without a trailing terminator.
pub fn join_lines(lines: &[RenderedLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shortest run of leading spaces/tabs across the non-blank lines
pub fn common_indentation<'a>(lines: impl IntoIterator<Item = &'a Line>) -> usize {
    lines
        .into_iter()
        .filter(|line| !line.is_blank())
        .map(|line| {
            line.text
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .count()
        })
        .min()
        .unwrap_or(0)
}

/// Drop the first `count` characters, or everything if the text is shorter.
fn strip_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((index, _)) => &text[index..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::scanning::scan;
    use crate::sampler::selection::expand_to_offsets;

    fn texts(lines: &[RenderedLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_indentation_ignores_blank_lines() {
        let file = scan("    a\n      b\n\n");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            remove_indentation: true,
            ..Default::default()
        };
        assert_eq!(texts(&render(&sample, &options)), vec!["a", "  b", ""]);

        let file = scan("    a\n      b\n\n    c");
        let sample = Sample::from_selector(&file, None);
        assert_eq!(texts(&render(&sample, &options)), vec!["a", "  b", "", "c"]);
    }

    #[test]
    fn test_whitespace_only_lines_are_stripped_as_far_as_possible() {
        let file = scan("\t\tx\n \n\t\t\ty");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            remove_indentation: true,
            ..Default::default()
        };
        assert_eq!(texts(&render(&sample, &options)), vec!["x", "", "\ty"]);
    }

    #[test]
    fn test_indentation_kept_by_default() {
        let file = scan("  a\n  b");
        let sample = Sample::from_selector(&file, None);
        let rendered = render(&sample, &RenderOptions::default());
        assert_eq!(texts(&rendered), vec!["  a", "  b"]);
    }

    #[test]
    fn test_skip_delimiters_and_offsets_use_prefilter_positions() {
        let file = scan("// sample(x)\none\n// end-sample\ntwo\nthree");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            skip_delimiters: true,
            skip: expand_to_offsets("4"),
            ..Default::default()
        };
        assert_eq!(texts(&render(&sample, &options)), vec!["one", "three"]);
    }

    #[test]
    fn test_mark_offsets_use_prefilter_positions() {
        let file = scan("// sample(x)\none\ntwo\n// end-sample");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            skip_delimiters: true,
            marked: expand_to_offsets("3"),
            ..Default::default()
        };
        let rendered = render(&sample, &options);
        let marked = RenderedLine {
            marked: true,
            ..RenderedLine::plain("two")
        };
        assert_eq!(rendered, vec![RenderedLine::plain("one"), marked]);
    }

    #[test]
    fn test_inline_mark_tag_is_stripped() {
        let file = scan("    keep();\n    look(); // mark-sample");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            remove_indentation: true,
            ..Default::default()
        };
        let rendered = render(&sample, &options);
        assert!(!rendered[0].marked);
        assert!(rendered[1].marked);
        assert_eq!(rendered[1].text, "look();");
    }

    #[test]
    fn test_sequential_numbers() {
        let content: Vec<String> = (1..=12).map(|n| n.to_string()).collect();
        let file = scan(&content.join("\n"));
        let sample = Sample::from_selector(&file, Some("3-12"));
        let options = RenderOptions {
            line_numbers: LineNumberMode::SequentialFrom(1),
            ..Default::default()
        };
        let rendered = render(&sample, &options);
        assert_eq!(rendered[0].number.as_deref(), Some(" 1"));
        assert_eq!(rendered[9].number.as_deref(), Some("10"));
    }

    #[test]
    fn test_original_numbers_follow_the_file() {
        let file = scan("a\n// sample(foo)\nb\n// end-sample\nc\n// sample(foo)\nd\n// end-sample");
        let sample = Sample::from_selector(&file, Some("foo"));
        let options = RenderOptions {
            line_numbers: LineNumberMode::Original,
            ..Default::default()
        };
        let numbers: Vec<_> = render(&sample, &options)
            .into_iter()
            .map(|line| line.number)
            .collect();
        assert_eq!(numbers, vec![Some("3".to_string()), Some("7".to_string())]);
    }

    #[test]
    fn test_everything_filtered_renders_nothing() {
        let file = scan("// sample(x)\n// end-sample");
        let sample = Sample::from_selector(&file, None);
        let options = RenderOptions {
            skip_delimiters: true,
            ..Default::default()
        };
        assert!(render(&sample, &options).is_empty());
    }

    #[test]
    fn test_join_lines_has_no_trailing_newline() {
        let lines = vec![RenderedLine::plain("a"), RenderedLine::plain("b")];
        assert_eq!(join_lines(&lines), "a\nb");
        assert_eq!(join_lines(&[]), "");
    }

    #[test]
    fn test_strip_chars() {
        assert_eq!(strip_chars("    x", 4), "x");
        assert_eq!(strip_chars("  ", 4), "");
        assert_eq!(strip_chars("ab", 0), "ab");
    }
}
