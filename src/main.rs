//! level-plot - water level telemetry chart generator
//!
//! Decodes a semicolon-delimited sensor export (hex payloads carrying
//! battery state and five historical distance readings per message) and
//! renders a two-panel distance/voltage chart to a PNG file.
//!
//! Module structure:
//! - `domain/` - Core value types (RawRow, Sample, DecodeOutcome)
//! - `services/` - Pipeline stages (parser, normalize, decode, assemble)
//! - `io/` - File input and chart rendering
//! - `infra/` - Configuration (TOML loading, defaults)

use clap::Parser;
use level_plot::infra::Config;
use level_plot::services;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// level-plot - sensor telemetry decoder and chart generator
#[derive(Parser, Debug)]
#[command(name = "level-plot", version, about)]
struct Args {
    /// Semicolon-delimited telemetry export to read
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path (PNG)
    #[arg(short, long, default_value = "water_level.png")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,
}

fn main() {
    // Structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug to see per-row skip reasons
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("level-plot starting");

    let args = Args::parse();

    // Load configuration from TOML file, falling back to built-in defaults
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        utc_offset_hours = %config.utc_offset_hours(),
        chart_width_px = %config.chart_width_px(),
        chart_height_px = %config.chart_height_px(),
        input = %args.input.display(),
        output = %args.output.display(),
        "config_loaded"
    );

    match services::run(&config, &args.input, &args.output) {
        Ok(summary) => {
            info!(
                rows = summary.rows_parsed,
                samples = summary.samples,
                skipped_rows = summary.rows_skipped_decode,
                device = %summary.device_id,
                output = %args.output.display(),
                "level-plot complete"
            );
        }
        Err(e) => {
            let err = anyhow::Error::from(e);
            error!(error = %format!("{:#}", err), "pipeline_failed");
            std::process::exit(1);
        }
    }
}
