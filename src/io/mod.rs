//! IO modules - file input and chart output
//!
//! This module contains all external IO operations:
//! - `reader` - input file loading with lossy UTF-8 decoding
//! - `chart` - two-panel time-series chart rendering (PNG)

pub mod chart;
pub mod reader;

// Re-export commonly used functions
pub use chart::render_chart;
pub use reader::read_input;
