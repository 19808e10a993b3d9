//! Region tracking
//!
//!     Consumes classified lines in file order and records, for every region name, the content
//!     lines that fall inside at least one open instance of that name.
//!
//!     Open instances form a stack. Starts push. A named end removes the innermost open
//!     instance with that name, wherever it sits in the stack. An anonymous end pops whatever
//!     was opened last. Ends with nothing to close are ignored, so partial tutorial-style
//!     snippets scan without complaint.
//!
//!     Membership is stored as indices into the file's flat line sequence. A line covered by
//!     several nested instances of the same name is recorded once for that name.

use std::collections::BTreeMap;

use super::delimiters::Delimiter;

#[derive(Debug, Default)]
pub struct RegionTracker {
    open: Vec<String>,
    regions: BTreeMap<String, Vec<usize>>,
}

impl RegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a delimiter to the open-instance stack.
    pub fn apply(&mut self, delimiter: Delimiter<'_>) {
        match delimiter {
            Delimiter::Start(name) => self.open.push(name.to_string()),
            Delimiter::EndNamed(name) => {
                if let Some(position) = self.open.iter().rposition(|open| open == name) {
                    self.open.remove(position);
                }
            }
            Delimiter::End => {
                self.open.pop();
            }
        }
    }

    /// Record a content line as a member of every currently open region.
    ///
    /// Indices must be recorded in increasing order.
    pub fn record(&mut self, index: usize) {
        for name in &self.open {
            let members = self.regions.entry(name.clone()).or_default();
            if members.last() != Some(&index) {
                members.push(index);
            }
        }
    }

    /// Names of the instances still open, innermost last
    pub fn open_regions(&self) -> &[String] {
        &self.open
    }

    pub fn finish(self) -> BTreeMap<String, Vec<usize>> {
        self.regions
    }
}
