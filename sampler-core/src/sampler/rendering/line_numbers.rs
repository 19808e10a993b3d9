//! Line number assignment
//!
//! Numbers are right-aligned to a fixed width so they line up in a fixed-width display. The
//! width is the digit count of the largest number the mode could produce:
//!
//!     - sequential: the number given to the last rendered line
//!     - original:   the last line number of the backing file

use std::fmt;

/// How rendered lines are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineNumberMode {
    #[default]
    Off,
    /// Count rendered lines, starting at the given number
    SequentialFrom(usize),
    /// Use each line's position in the original file
    Original,
}

impl LineNumberMode {
    /// Parse the textual form used by configuration and element attributes.
    ///
    /// `original`, `true`/`yes`/`on`, or a positive start number. Everything else turns
    /// numbering off.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "original" => LineNumberMode::Original,
            "true" | "yes" | "on" => LineNumberMode::SequentialFrom(1),
            other => match other.parse::<usize>() {
                Ok(start) if start > 0 => LineNumberMode::SequentialFrom(start),
                _ => LineNumberMode::Off,
            },
        }
    }
}

impl fmt::Display for LineNumberMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNumberMode::Off => write!(f, "off"),
            LineNumberMode::SequentialFrom(start) => write!(f, "{}", start),
            LineNumberMode::Original => write!(f, "original"),
        }
    }
}

/// Assigns padded numbers to rendered lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineNumbering {
    mode: LineNumberMode,
    width: usize,
}

impl LineNumbering {
    pub(crate) fn new(mode: LineNumberMode, rendered_lines: usize, file_line_count: usize) -> Self {
        let largest = match mode {
            LineNumberMode::Off => 0,
            LineNumberMode::SequentialFrom(start) => {
                start.saturating_add(rendered_lines.saturating_sub(1))
            }
            LineNumberMode::Original => file_line_count,
        };
        LineNumbering {
            mode,
            width: digits(largest),
        }
    }

    /// Number for the line at `position` among the rendered lines
    pub(crate) fn number(&self, position: usize, original: usize) -> Option<String> {
        let number = match self.mode {
            LineNumberMode::Off => return None,
            LineNumberMode::SequentialFrom(start) => start.saturating_add(position),
            LineNumberMode::Original => original,
        };
        Some(format!("{:>width$}", number, width = self.width))
    }
}

fn digits(mut value: usize) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}
