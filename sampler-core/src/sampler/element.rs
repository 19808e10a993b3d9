//! Element requests
//!
//!     A displayed sample is described by a slug and a set of attributes. The slug names the
//!     file and, after the first `#`, the selector:
//!
//!         src/greet.js#greet,12-14
//!
//!     [`SampleRequest`] carries everything one sample needs through the asynchronous fetch
//!     and into rendering, so nothing depends on variables captured from the surrounding
//!     loop.

use serde::Serialize;

use crate::sampler::assembly::Sample;
use crate::sampler::error::SampleError;
use crate::sampler::options::{ElementAttributes, SamplerDefaults};
use crate::sampler::rendering::{join_lines, render, RenderOptions, RenderedLine};
use crate::sampler::scanning::ScannedFile;

/// The rendered output handed to the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSample {
    pub lines: Vec<RenderedLine>,
    /// File extension, used to pick a syntax highlighting grammar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl RenderedSample {
    /// Line texts joined with newlines
    pub fn to_text(&self) -> String {
        join_lines(&self.lines)
    }

    /// `language-<ext>` class name for highlighters
    pub fn language_class(&self) -> Option<String> {
        self.content_type
            .as_ref()
            .map(|extension| format!("language-{}", extension))
    }
}

/// Context for one displayed sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRequest {
    pub file: String,
    pub selector: Option<String>,
    pub attributes: ElementAttributes,
}

impl SampleRequest {
    /// Parse a `PATH[#SELECTOR]` slug.
    pub fn parse(slug: &str, attributes: ElementAttributes) -> Self {
        let (file, selector) = match slug.split_once('#') {
            Some((file, selector)) => (file, Some(selector)),
            None => (slug, None),
        };
        SampleRequest {
            file: file.to_string(),
            selector: selector
                .filter(|selector| !selector.is_empty())
                .map(str::to_string),
            attributes,
        }
    }

    /// Fetch key: the configured proxy prefix plus the file path
    pub fn identifier(&self, defaults: &SamplerDefaults) -> String {
        format!("{}{}", defaults.proxy_url, self.file)
    }

    /// Extension of the file's last path segment
    pub fn content_type(&self) -> Option<&str> {
        let name = self.file.rsplit('/').next().unwrap_or(self.file.as_str());
        name.rsplit_once('.')
            .map(|(_, extension)| extension)
            .filter(|extension| !extension.is_empty())
    }

    /// Select, resolve options and render against an already scanned file.
    pub fn render(
        &self,
        file: &ScannedFile,
        defaults: &SamplerDefaults,
    ) -> Result<RenderedSample, SampleError> {
        let selector = self.selector.as_deref();
        let sample = Sample::from_selector(file, selector).require_lines(&self.file, selector)?;
        let options = RenderOptions::resolve(defaults, &self.attributes);

        Ok(RenderedSample {
            lines: render(&sample, &options),
            content_type: self.content_type().map(str::to_string),
        })
    }
}
