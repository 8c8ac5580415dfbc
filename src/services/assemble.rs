//! Series assembly
//!
//! Flattens the per-row sample batches into one chronologically sorted
//! series. The sort is stable, so samples sharing a timestamp keep their
//! original row order.

use crate::domain::types::{DeviceId, Sample};

/// The merged, sorted sample series plus the label used for the chart
/// title.
#[derive(Debug, Clone)]
pub struct Series {
    pub samples: Vec<Sample>,
    pub device_id: DeviceId,
}

/// Merge all samples into one ascending series, or None when nothing
/// decoded.
///
/// The chart label is the device ID of the first sample in sorted order.
/// Multi-device input is not split; it produces one chart labeled with
/// whichever device sorts first.
pub fn assemble_series(mut samples: Vec<Sample>) -> Option<Series> {
    if samples.is_empty() {
        return None;
    }

    // Vec::sort_by_key is stable
    samples.sort_by_key(|sample| sample.timestamp);

    let device_id = samples[0].device_id.clone();
    Some(Series { samples, device_id })
}
