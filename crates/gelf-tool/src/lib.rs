//! gelf-tool library entry.
//!
//! Wires config loading and the record normalizer into a stream pipeline:
//! newline-delimited GELF JSON in, canonical GELF JSON out. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod config;
pub mod error;
pub mod normalize;

pub use error::{Result, ToolError};
