//! Two-panel time-series chart rendering
//!
//! Top panel (2/3 height): distance vs. time, line with point markers,
//! Y axis inverted so "up" visually means more water. Bottom panel
//! (1/3 height): battery voltage, line only, Y range tightened to the
//! data. Both panels share the same time extent, labeled `MM/DD HH:MM`.

use crate::domain::types::Sample;
use crate::infra::Config;
use crate::services::Series;
use anyhow::Context;
use chrono::{DateTime, Duration, FixedOffset};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Distance series color (blue)
const DISTANCE_COLOR: RGBColor = RGBColor(0x00, 0x72, 0xB2);
/// Voltage series color (vermilion)
const VOLTAGE_COLOR: RGBColor = RGBColor(0xD5, 0x5E, 0x00);

/// Voltage panel padding above and below the data, in volts
const VOLTAGE_MARGIN_V: f64 = 0.05;

/// Fallback voltage range when the data bounds are not finite
const VOLTAGE_FALLBACK_RANGE: (f64, f64) = (0.0, 5.0);

/// Render the assembled series to a PNG at the given path.
///
/// The image is written only after the full series is drawn; a failure
/// on any step propagates before `present` commits the file.
pub fn render_chart(series: &Series, output: &Path, config: &Config) -> anyhow::Result<()> {
    let samples = &series.samples;
    let (time_min, time_max) = time_extent(samples).context("cannot chart an empty series")?;

    let width = config.chart_width_px();
    let height = config.chart_height_px();

    let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE).context("failed to prepare chart canvas")?;

    // Distance panel takes the top 2/3 of the canvas
    let (upper, lower) = root.split_vertically(height * 2 / 3);

    draw_distance_panel(&upper, series, time_min, time_max)
        .context("failed to draw distance panel")?;
    draw_voltage_panel(&lower, samples, time_min, time_max)
        .context("failed to draw voltage panel")?;

    root.present()
        .with_context(|| format!("failed to write chart image {}", output.display()))?;

    debug!(output = %output.display(), width, height, "chart_written");
    Ok(())
}

/// Shared X extent; a degenerate single-instant extent is widened so the
/// coordinate mapping stays valid.
fn time_extent(samples: &[Sample]) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let min = samples.iter().map(|s| s.timestamp).min()?;
    let max = samples.iter().map(|s| s.timestamp).max()?;
    if min < max {
        Some((min, max))
    } else {
        Some((min - Duration::minutes(1), max + Duration::minutes(1)))
    }
}

fn draw_distance_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    series: &Series,
    time_min: DateTime<FixedOffset>,
    time_max: DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    let samples = &series.samples;
    let distances = samples.iter().map(|s| f64::from(s.distance_mm));
    let dist_min = distances.clone().fold(f64::INFINITY, f64::min);
    let dist_max = distances.fold(f64::NEG_INFINITY, f64::max);
    let pad = ((dist_max - dist_min) * 0.05).max(1.0);

    // Reversed Y range inverts the axis: smaller distance = higher water
    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Water Level Monitoring [Device: {}]", series.device_id),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(time_min..time_max, (dist_max + pad)..(dist_min - pad))?;

    chart
        .configure_mesh()
        .x_label_formatter(&format_time_label)
        .y_desc("Distance [mm] (lower = higher water)")
        .label_style(("sans-serif", 14))
        .draw()?;

    let points: Vec<(DateTime<FixedOffset>, f64)> = samples
        .iter()
        .map(|s| (s.timestamp, f64::from(s.distance_mm)))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &DISTANCE_COLOR))?
        .label("Distance (mm)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DISTANCE_COLOR));
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 2, DISTANCE_COLOR.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()?;

    Ok(())
}

fn draw_voltage_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    samples: &[Sample],
    time_min: DateTime<FixedOffset>,
    time_max: DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    let volt_min = samples.iter().map(|s| s.voltage_v).fold(f64::INFINITY, f64::min);
    let volt_max = samples.iter().map(|s| s.voltage_v).fold(f64::NEG_INFINITY, f64::max);

    let (y_lo, y_hi) = if volt_min.is_finite() && volt_max.is_finite() {
        (volt_min - VOLTAGE_MARGIN_V, volt_max + VOLTAGE_MARGIN_V)
    } else {
        VOLTAGE_FALLBACK_RANGE
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Battery Voltage", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(time_min..time_max, y_lo..y_hi)?;

    let x_desc = match samples.first() {
        Some(sample) => format!("Timestamp (UTC{})", sample.timestamp.offset()),
        None => "Timestamp".to_string(),
    };

    chart
        .configure_mesh()
        .x_label_formatter(&format_time_label)
        .x_desc(x_desc)
        .y_desc("Voltage [V]")
        .label_style(("sans-serif", 14))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.timestamp, s.voltage_v)),
            VOLTAGE_COLOR.stroke_width(2),
        ))?
        .label("Voltage (V)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], VOLTAGE_COLOR));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()?;

    Ok(())
}

fn format_time_label(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%m/%d %H:%M").to_string()
}
