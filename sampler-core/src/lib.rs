//! # sampler
//!
//! Extracts code samples from specially formatted source files and renders them as
//! annotated lines, ready to be dropped into a slide or any other fixed-width display.
//!
//! File Layout
//!
//! The engine is a strict pipeline, and the layout follows it:
//!
//! src/sampler
//!   ├── scanning     raw text -> lines + named regions
//!   ├── selection    selector text -> range descriptors
//!   ├── assembly     scanned file + descriptors -> sample
//!   ├── rendering    sample + options -> decorated lines
//!   └── <host glue>  options, element requests, fetching, output formats
//!
//! Only the fetch module performs I/O. Everything upstream of it is pure and can be
//! exercised with in-memory strings, see the [testing module](sampler::testing).

pub mod sampler;
