//! Error types for sample extraction
//!
//! Two things can go wrong for a displayed sample: the file cannot be retrieved, or the
//! selector resolves to no lines at all. Both are reported per sample; neither affects other
//! samples, and nothing is retried. Unparseable selector items are not errors, they are
//! dropped by the selector parser.

use std::fmt;

/// Failure reported by a [`Fetcher`](crate::sampler::fetch::Fetcher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    NotFound(String),
    Io { identifier: String, message: String },
    /// The retrieval was abandoned by whoever was performing it
    Abandoned(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound(identifier) => write!(f, "file not found: {}", identifier),
            FetchError::Io {
                identifier,
                message,
            } => write!(f, "failed to read {}: {}", identifier, message),
            FetchError::Abandoned(identifier) => {
                write!(f, "retrieval of {} did not complete", identifier)
            }
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleErrorKind {
    /// The file content could not be retrieved
    RetrievalFailure(FetchError),
    /// The selector matched no lines: an unknown region name, a degenerate range, or only
    /// skip-tagged lines
    EmptySample,
}

/// Error for a single sample, carrying enough context for the host to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleError {
    pub kind: SampleErrorKind,
    pub file: String,
    pub selector: Option<String>,
}

impl SampleError {
    pub fn retrieval(file: impl Into<String>, selector: Option<&str>, error: FetchError) -> Self {
        SampleError {
            kind: SampleErrorKind::RetrievalFailure(error),
            file: file.into(),
            selector: selector.map(str::to_string),
        }
    }

    pub fn empty(file: impl Into<String>, selector: Option<&str>) -> Self {
        SampleError {
            kind: SampleErrorKind::EmptySample,
            file: file.into(),
            selector: selector.map(str::to_string),
        }
    }

    pub fn is_empty_sample(&self) -> bool {
        matches!(self.kind, SampleErrorKind::EmptySample)
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.selector) {
            (SampleErrorKind::RetrievalFailure(error), _) => {
                write!(f, "could not retrieve '{}': {}", self.file, error)
            }
            (SampleErrorKind::EmptySample, Some(selector)) => write!(
                f,
                "no lines selected from '{}' by selector '{}'",
                self.file, selector
            ),
            (SampleErrorKind::EmptySample, None) => {
                write!(f, "no lines to show from '{}'", self.file)
            }
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            SampleErrorKind::RetrievalFailure(error) => Some(error),
            SampleErrorKind::EmptySample => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = SampleError::empty("demo.js", Some("greet"));
        assert_eq!(
            error.to_string(),
            "no lines selected from 'demo.js' by selector 'greet'"
        );

        let error = SampleError::retrieval(
            "missing.js",
            None,
            FetchError::NotFound("missing.js".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "could not retrieve 'missing.js': file not found: missing.js"
        );
        assert!(!error.is_empty_sample());
    }
}
