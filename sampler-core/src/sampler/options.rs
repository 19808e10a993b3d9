//! Option resolution
//!
//!     Rendering options come from two layers. [`SamplerDefaults`] holds the host-wide
//!     configuration; [`ElementAttributes`] holds what a single displayed sample asks for.
//!     Element values win when present, otherwise the default applies.
//!
//!     The skip setting is a selector with one extra word: `delimiters` (or `delimiter`)
//!     drops the region delimiter lines, and its numeric items drop lines by offset.
//!     For example `delimiters, 1-2` hides delimiters and the first two sample lines.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::sampler::rendering::{LineNumberMode, RenderOptions};
use crate::sampler::selection::expand_to_offsets;

static DELIMITERS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdelimiters?\b").unwrap());

static SKIP_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

/// Line numbering as expressed in configuration files.
///
/// Accepts `"off"`, `"sequential"` or `"original"`, and also a plain boolean where `true`
/// means sequential numbering from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "LineNumberValue")]
pub enum LineNumberSetting {
    #[default]
    Off,
    Sequential,
    Original,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LineNumberValue {
    Flag(bool),
    Name(String),
}

impl TryFrom<LineNumberValue> for LineNumberSetting {
    type Error = String;

    fn try_from(value: LineNumberValue) -> Result<Self, Self::Error> {
        match value {
            LineNumberValue::Flag(true) => Ok(LineNumberSetting::Sequential),
            LineNumberValue::Flag(false) => Ok(LineNumberSetting::Off),
            LineNumberValue::Name(name) => match name.as_str() {
                "off" => Ok(LineNumberSetting::Off),
                "sequential" => Ok(LineNumberSetting::Sequential),
                "original" => Ok(LineNumberSetting::Original),
                other => Err(format!(
                    "unknown line number setting '{}' (expected off, sequential, original or a boolean)",
                    other
                )),
            },
        }
    }
}

impl From<LineNumberSetting> for LineNumberMode {
    fn from(setting: LineNumberSetting) -> Self {
        match setting {
            LineNumberSetting::Off => LineNumberMode::Off,
            LineNumberSetting::Sequential => LineNumberMode::SequentialFrom(1),
            LineNumberSetting::Original => LineNumberMode::Original,
        }
    }
}

/// Host-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplerDefaults {
    /// Prefix prepended to every file identifier before fetching
    pub proxy_url: String,
    pub remove_indentation: bool,
    pub line_numbers: LineNumberSetting,
    /// Skip selector applied when an element has none of its own
    pub skip: String,
}

impl SamplerDefaults {
    /// Skip default with commas and/or whitespace as separators, re-joined with commas.
    pub fn normalized_skip(&self) -> String {
        SKIP_SEPARATORS
            .split(&self.skip)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Per-element indentation override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentMode {
    Remove,
    Keep,
}

impl IndentMode {
    /// `remove` or `keep`; anything else means "inherit the default".
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "remove" => Some(IndentMode::Remove),
            "keep" => Some(IndentMode::Keep),
            _ => None,
        }
    }
}

impl fmt::Display for IndentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentMode::Remove => write!(f, "remove"),
            IndentMode::Keep => write!(f, "keep"),
        }
    }
}

/// What a single displayed sample asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementAttributes {
    /// Numeric selector of sample lines to highlight
    pub mark: Option<String>,
    pub indent: Option<IndentMode>,
    /// Skip selector, replaces the default one
    pub skip: Option<String>,
    /// Textual line number mode, see [`LineNumberMode::parse`]
    pub line_numbers: Option<String>,
}

impl RenderOptions {
    /// Combine host defaults with element attributes.
    pub fn resolve(defaults: &SamplerDefaults, attributes: &ElementAttributes) -> Self {
        let skip = match attributes.skip.as_deref() {
            Some(skip) if !skip.trim().is_empty() => skip.to_string(),
            _ => defaults.normalized_skip(),
        };

        let remove_indentation = match attributes.indent {
            Some(IndentMode::Remove) => true,
            Some(IndentMode::Keep) => false,
            None => defaults.remove_indentation,
        };

        let line_numbers = match attributes.line_numbers.as_deref() {
            Some(text) if !text.trim().is_empty() => LineNumberMode::parse(text),
            _ => defaults.line_numbers.into(),
        };

        RenderOptions {
            remove_indentation,
            line_numbers,
            marked: attributes
                .mark
                .as_deref()
                .map(expand_to_offsets)
                .unwrap_or_default(),
            skip_delimiters: DELIMITERS_WORD.is_match(&skip),
            skip: expand_to_offsets(&skip),
        }
    }
}
