//! Shared types for the water level plotter

use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use thiserror::Error;

/// Newtype wrapper for device IDs to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DeviceId(pub String);

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One cleaned CSV line: hex payload, device ID, and the raw timestamp
/// string exactly as exported. Produced by the row parser, consumed by
/// the timestamp normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub data: String,
    pub device_id: DeviceId,
    pub timestamp_raw: String,
}

/// A `RawRow` whose timestamp has been parsed and converted to the
/// display zone. Rows that fail timestamp parsing are dropped, never
/// carried forward with a null timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub data: String,
    pub device_id: DeviceId,
    pub timestamp: DateTime<FixedOffset>,
}

/// One decoded distance reading plus its message's voltage/battery context.
///
/// Five samples are produced per message, sharing voltage and battery but
/// differing in timestamp and distance. Ordering is timestamp ascending,
/// ties broken by original row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<FixedOffset>,
    pub distance_mm: u16,
    pub voltage_v: f64,
    pub battery_pct: u8,
    pub device_id: DeviceId,
}

/// Number of historical distance readings batched into one message.
pub const SAMPLES_PER_MESSAGE: usize = 5;

/// Result of decoding a single row's payload.
///
/// Skips are data-quality filters, not errors: the row contributes no
/// samples but the batch continues. The reason is kept so callers can
/// count and log skip causes instead of silently absorbing them.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Samples([Sample; SAMPLES_PER_MESSAGE]),
    Skipped(SkipReason),
}

/// Why a row yielded zero samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than 24 hex characters remained after stripping non-hex bytes
    TruncatedPayload { hex_chars: usize },
    /// Hex-to-byte conversion failed despite the length check
    MalformedHex,
}

impl SkipReason {
    pub fn as_str(&self) -> &str {
        match self {
            SkipReason::TruncatedPayload { .. } => "truncated_payload",
            SkipReason::MalformedHex => "malformed_hex",
        }
    }
}

/// Fatal-terminal pipeline failures.
///
/// Row-level problems (bad lines, unparsable timestamps, short payloads)
/// are skips; only whole-batch emptiness or an unusable input/output
/// escalates to one of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input file {}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no data rows survived parsing")]
    NoRows,

    #[error("no rows had a parseable timestamp")]
    NoTimestamps,

    #[error("no samples decoded from any payload")]
    NoSamples,

    #[error("chart rendering failed")]
    Render(#[source] anyhow::Error),
}
