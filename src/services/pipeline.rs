//! Pipeline orchestration
//!
//! Runs the stages in order against explicit input/output paths: read,
//! parse, normalize, decode, assemble, render. Row-level problems are
//! skips; a batch that comes out empty at any stage is terminal. The
//! image is written only after the full series is assembled, so no
//! partial output ever exists on disk.

use crate::domain::types::{
    DecodeOutcome, DeviceId, PipelineError, Sample, SAMPLES_PER_MESSAGE,
};
use crate::infra::Config;
use crate::io;
use crate::services::{assemble, decode, normalize, parser};
use std::path::Path;
use tracing::{debug, info};

/// Aggregate counts from one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub rows_parsed: usize,
    pub rows_normalized: usize,
    pub rows_skipped_decode: usize,
    pub samples: usize,
    pub device_id: DeviceId,
}

/// Run the full pipeline: input CSV to rendered chart.
pub fn run(config: &Config, input: &Path, output: &Path) -> Result<RunSummary, PipelineError> {
    let text = io::read_input(input)?;

    let rows = parser::parse_rows(&text);
    if rows.is_empty() {
        return Err(PipelineError::NoRows);
    }
    let rows_parsed = rows.len();
    info!(rows = rows_parsed, "rows_parsed");

    let normalized = normalize::normalize_rows(rows, config.display_offset());
    if normalized.is_empty() {
        return Err(PipelineError::NoTimestamps);
    }
    let rows_normalized = normalized.len();
    info!(rows = rows_normalized, "timestamps_normalized");

    let mut samples: Vec<Sample> = Vec::with_capacity(rows_normalized * SAMPLES_PER_MESSAGE);
    let mut rows_skipped_decode = 0usize;
    for row in &normalized {
        match decode::decode_payload(row) {
            DecodeOutcome::Samples(batch) => samples.extend(batch),
            DecodeOutcome::Skipped(reason) => {
                rows_skipped_decode += 1;
                debug!(reason = reason.as_str(), device = %row.device_id, "row_skipped");
            }
        }
    }

    let Some(series) = assemble::assemble_series(samples) else {
        return Err(PipelineError::NoSamples);
    };
    info!(
        samples = series.samples.len(),
        skipped_rows = rows_skipped_decode,
        device = %series.device_id,
        "series_assembled"
    );

    io::render_chart(&series, output, config).map_err(PipelineError::Render)?;
    info!(output = %output.display(), "chart_written");

    Ok(RunSummary {
        rows_parsed,
        rows_normalized,
        rows_skipped_decode,
        samples: series.samples.len(),
        device_id: series.device_id,
    })
}
