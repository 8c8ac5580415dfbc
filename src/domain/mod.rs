//! Domain models - core value types of the decode pipeline
//!
//! This module contains the canonical data types used throughout the system:
//! - `RawRow` - one cleaned CSV line before timestamp parsing
//! - `NormalizedRow` - a row with a parsed, zoned timestamp
//! - `Sample` - one decoded (timestamp, distance) reading with its
//!   message's voltage/battery context
//! - `DecodeOutcome` / `SkipReason` - observable result of decoding one row
//! - `PipelineError` - the fatal-terminal failure taxonomy

pub mod types;

// Re-export commonly used types at module level
pub use types::{
    DecodeOutcome, DeviceId, NormalizedRow, PipelineError, RawRow, Sample, SkipReason,
};
