//! Main module for sampler library functionality

pub mod assembly;
pub mod element;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod options;
pub mod rendering;
pub mod scanning;
pub mod selection;
pub mod testing;

pub use assembly::{assemble, Sample};
pub use element::{RenderedSample, SampleRequest};
pub use error::{FetchError, SampleError, SampleErrorKind};
pub use fetch::{FileFetcher, Fetcher, MemoryFetcher, SampleFiles};
pub use options::{ElementAttributes, IndentMode, LineNumberSetting, SamplerDefaults};
pub use rendering::{render, LineNumberMode, RenderOptions, RenderedLine};
pub use scanning::{scan, DelimiterKind, Line, ScannedFile};
pub use selection::{expand_to_offsets, parse_selector, RangeDescriptor};
