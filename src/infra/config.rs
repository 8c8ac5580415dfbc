//! Configuration loading from TOML files
//!
//! Only display and chart settings live in the config file; input and
//! output paths are command line arguments so tests can drive the
//! pipeline with arbitrary paths.

use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default display zone: JST, fixed UTC+9, no daylight-saving rules
const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Default chart canvas: 12 x 10 inches at 150 DPI
const DEFAULT_CHART_WIDTH_PX: u32 = 1800;
const DEFAULT_CHART_HEIGHT_PX: u32 = 1500;

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Fixed UTC offset (hours) applied to all timestamps for display
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { utc_offset_hours: default_utc_offset_hours() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width_px")]
    pub width_px: u32,
    #[serde(default = "default_chart_height_px")]
    pub height_px: u32,
}

fn default_chart_width_px() -> u32 {
    DEFAULT_CHART_WIDTH_PX
}

fn default_chart_height_px() -> u32 {
    DEFAULT_CHART_HEIGHT_PX
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { width_px: default_chart_width_px(), height_px: default_chart_height_px() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    utc_offset_hours: i32,
    chart_width_px: u32,
    chart_height_px: u32,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            chart_width_px: DEFAULT_CHART_WIDTH_PX,
            chart_height_px: DEFAULT_CHART_HEIGHT_PX,
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let hours = toml_config.display.utc_offset_hours;
        anyhow::ensure!(
            (-23..=23).contains(&hours),
            "display.utc_offset_hours out of range: {} (expected -23..23)",
            hours
        );

        Ok(Self {
            utc_offset_hours: hours,
            chart_width_px: toml_config.chart.width_px,
            chart_height_px: toml_config.chart.height_px,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Fixed display zone derived from the configured hour offset
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| {
            FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .expect("default offset is valid")
        })
    }

    pub fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }

    pub fn chart_width_px(&self) -> u32 {
        self.chart_width_px
    }

    pub fn chart_height_px(&self) -> u32 {
        self.chart_height_px
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
