//! # txo_chart: Presentation Layer
//!
//! Turns payoff computations into something a person can read:
//! - `format`: Thousands-separated summaries and settlement rows
//! - `render`: The `CurveRenderer` capability and the chart request it consumes
//! - `plotting`: `PlottersRenderer`, writing PNG or SVG payoff charts
//!
//! The core payoff crate never depends on this one, so the model stays
//! testable without a file system or graphics stack.

#![deny(missing_docs)]

pub mod error;
pub mod font;
pub mod format;
pub mod plotting;
pub mod render;

pub use error::ChartError;
pub use format::{
    format_points, format_settlement_line, format_signed_thousands, format_summary,
    format_thousands,
};
pub use plotting::{ChartConfig, PlottersRenderer, DEFAULT_CHART_FILE};
pub use render::{ChartRequest, CurveRenderer, SeriesLabels};
