//! Pipeline stages - pure row transformations
//!
//! Data flows strictly forward through these stages:
//! - `parser` - raw CSV text to `RawRow`s
//! - `normalize` - timestamp parsing and display-zone conversion
//! - `decode` - hex payload to five time-shifted `Sample`s
//! - `assemble` - flatten and sort all samples into one series
//! - `pipeline` - orchestration of the whole run

pub mod assemble;
pub mod decode;
pub mod normalize;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use assemble::Series;
pub use pipeline::{run, RunSummary};
