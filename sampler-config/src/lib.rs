//! Configuration for sampler hosts.
//!
//! Settings resolve in layers: the built-in `defaults/sampler.default.toml` (compiled into
//! the binary, so it doubles as the reference documentation), then any files the host adds,
//! then individual overrides. [`Loader`] stacks the layers and produces a [`SamplerConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use sampler_core::sampler::formats::OutputFormat;
use sampler_core::sampler::SamplerDefaults;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/sampler.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "sampler.toml";

/// Top-level configuration consumed by sampler hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    pub sampler: SamplerDefaults,
    pub output: OutputConfig,
}

/// How hosts that print samples should serialize them.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Stacks configuration sources over the embedded defaults; later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the built-in `sampler.default.toml`.
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Loader {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Add a TOML file that must exist; `build` fails if it does not.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Add a TOML file that is skipped when absent, e.g. [`LOCAL_CONFIG_FILE`].
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    /// Force one dotted key, e.g. `sampler.skip` from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every source and deserialize into [`SamplerConfig`].
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<SamplerConfig, ConfigError> {
    Loader::new().build()
}
