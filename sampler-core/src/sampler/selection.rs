//! Selector parsing
//!
//! Selector grammar
//!
//!     selector := item (',' item)*
//!     item     := NUMBER ('-' NUMBER)? | NAME
//!
//!     Whitespace around items is ignored and empty items are dropped. Anything that is not a
//!     line number or a line range is taken verbatim (trimmed) as a region name; there is no
//!     escaping, so names cannot contain commas.
//!
//!     Line numbers are 1-based and ranges are inclusive: `3-6` selects lines 3, 4, 5 and 6.
//!     A reversed range such as `6-3` selects nothing.
//!
//!     Order matters. Descriptors are resolved in the order written, and repeating an item
//!     repeats its lines in the output.
//!
//! Offset expansion
//!
//!     Mark and skip selectors address lines of the rendered sample rather than the file, and
//!     only their numeric items mean anything there. [`expand_to_offsets`] turns those items
//!     into zero-based offsets, e.g. `3-6,12` becomes {2, 3, 4, 5, 11}.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]+)(?:-([0-9]+))?\s*$").unwrap());

/// One item of a parsed selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeDescriptor {
    /// Zero-based `start`, `length` lines
    Numeric { start: usize, length: usize },
    Named { name: String },
}

impl RangeDescriptor {
    /// Build a numeric descriptor from 1-based inclusive line numbers.
    ///
    /// Line 0 does not exist, so a range starting there is clamped to line 1.
    pub fn lines(first: usize, last: usize) -> Self {
        let start = first.saturating_sub(1);
        RangeDescriptor::Numeric {
            start,
            length: last.saturating_sub(start),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        RangeDescriptor::Named { name: name.into() }
    }

    /// Zero-based offsets covered by a numeric descriptor
    pub fn offsets(&self) -> Option<Range<usize>> {
        match self {
            RangeDescriptor::Numeric { start, length } => {
                Some(*start..start.saturating_add(*length))
            }
            RangeDescriptor::Named { .. } => None,
        }
    }
}

impl fmt::Display for RangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeDescriptor::Numeric { length: 0, .. } => write!(f, "(empty)"),
            RangeDescriptor::Numeric { start, length: 1 } => write!(f, "{}", start + 1),
            RangeDescriptor::Numeric { start, length } => {
                write!(f, "{}-{}", start + 1, start + length)
            }
            RangeDescriptor::Named { name } => write!(f, "{}", name),
        }
    }
}

/// Parse a selector into descriptors, preserving input order.
///
/// An empty result means "the whole file".
pub fn parse_selector(selector: &str) -> Vec<RangeDescriptor> {
    selector.split(',').filter_map(parse_item).collect()
}

fn parse_item(item: &str) -> Option<RangeDescriptor> {
    if let Some(captures) = LINE_RANGE.captures(item) {
        let first = parse_number(&captures[1]);
        let last = captures.get(2).map_or(first, |m| parse_number(m.as_str()));
        return Some(RangeDescriptor::lines(first, last));
    }

    let name = item.trim();
    if name.is_empty() {
        None
    } else {
        Some(RangeDescriptor::named(name))
    }
}

fn parse_number(digits: &str) -> usize {
    // Only overflow can fail here; such a line does not exist anyway.
    digits.parse().unwrap_or(usize::MAX)
}

/// A set of zero-based offsets, kept as ranges so huge selectors stay cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetSet {
    ranges: Vec<Range<usize>>,
}

impl OffsetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_range(&mut self, range: Range<usize>) {
        if !range.is_empty() {
            self.ranges.push(range);
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.ranges.iter().any(|range| range.contains(&offset))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Offsets in ascending order, without duplicates
    pub fn to_sorted(&self) -> BTreeSet<usize> {
        self.ranges.iter().cloned().flatten().collect()
    }
}

impl FromIterator<usize> for OffsetSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = OffsetSet::new();
        for offset in iter {
            set.insert_range(offset..offset.saturating_add(1));
        }
        set
    }
}

/// Expand the numeric items of a selector into zero-based offsets. Names are ignored.
pub fn expand_to_offsets(selector: &str) -> OffsetSet {
    let mut set = OffsetSet::new();
    for range in parse_selector(selector)
        .iter()
        .filter_map(RangeDescriptor::offsets)
    {
        set.insert_range(range);
    }
    set
}
