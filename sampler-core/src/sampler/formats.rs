//! Output formats
//!
//! Serializers for [`RenderedSample`]s, used by hosts that print samples rather than build
//! a document tree from them.
//!
//!     annotated   gutter + line number + text, `> ` in the gutter for marked lines
//!     plain       just the text, e.g. for piping into a highlighter
//!     json        the rendered lines as JSON

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::sampler::element::RenderedSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Annotated,
    Plain,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Annotated,
        OutputFormat::Plain,
        OutputFormat::Json,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Annotated => "annotated",
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    UnknownFormat(String),
    SerializationFailed(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(
                f,
                "Unknown format '{}' (expected one of: annotated, plain, json)",
                name
            ),
            FormatError::SerializationFailed(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}

/// Serialize a rendered sample. Text formats carry no trailing newline.
pub fn serialize(sample: &RenderedSample, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Plain => Ok(sample.to_text()),
        OutputFormat::Annotated => Ok(annotate(sample)),
        OutputFormat::Json => serde_json::to_string_pretty(sample)
            .map_err(|e| FormatError::SerializationFailed(e.to_string())),
    }
}

fn annotate(sample: &RenderedSample) -> String {
    sample
        .lines
        .iter()
        .map(|line| {
            let gutter = if line.marked { "> " } else { "  " };
            match &line.number {
                Some(number) => format!("{}{}: {}", gutter, number, line.text),
                None => format!("{}{}", gutter, line.text),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
