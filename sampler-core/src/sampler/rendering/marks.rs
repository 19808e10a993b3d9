//! Inline mark tags
//!
//! A line can ask to be highlighted with a `mark-sample` comment in any of these dialects:
//!
//!     code(); // mark-sample
//!     code()  # mark-sample
//!     code(); /* mark-sample */
//!     <p>code</p> <!-- mark-sample -->
//!
//! Line comments must end the line. Block comments may sit anywhere. The tag (and the
//! whitespace before it) is removed from the displayed text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static MARK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\s*(//|#)\s*mark-sample\s*$)|(\s*/\*\s*mark-sample\s*\*/(\s*$)?)|(\s*<!--\s*mark-sample\s*-->(\s*$)?)",
    )
    .unwrap()
});

/// Strip a mark tag from `text`, returning `None` if the line carries no tag.
pub fn strip_mark_tag(text: &str) -> Option<Cow<'_, str>> {
    if MARK_TAG.is_match(text) {
        Some(MARK_TAG.replace(text, ""))
    } else {
        None
    }
}
