//! Plotters-backed payoff chart renderer.
//!
//! Draws both payoff curves, a dashed zero line, the strike marker, title,
//! axis descriptions and a legend. The y axis uses thousands separators.
//! Files ending in `.svg` use the SVG backend, everything else is a PNG.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ChartError;
use crate::font::{self, FONT_FAMILY};
use crate::format::format_thousands;
use crate::render::{ChartRequest, CurveRenderer};

/// Default chart file name.
pub const DEFAULT_CHART_FILE: &str = "txo_profit_curve.png";

const STRIKE_GREY: RGBColor = RGBColor(128, 128, 128);

/// Dash segments drawn across the zero line.
const ZERO_LINE_DASHES: usize = 80;

/// Chart output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Destination file
    pub output: PathBuf,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// TrueType font for chart text; well-known system fonts are tried when unset
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_CHART_FILE),
            width: 1200,
            height: 700,
            font_path: None,
        }
    }
}

/// Writes payoff charts with plotters.
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    config: ChartConfig,
}

impl PlottersRenderer {
    /// Creates a renderer for the given output settings.
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    fn draw_to(&self, path: &Path, request: &ChartRequest) -> Result<(), ChartError> {
        let size = (self.config.width, self.config.height);
        debug!(path = %path.display(), width = size.0, height = size.1, "Rendering payoff chart");

        if is_svg(path) {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, request)?;
            root.present().map_err(ChartError::render)
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, request)?;
            root.present().map_err(ChartError::render)
        }
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

impl CurveRenderer for PlottersRenderer {
    fn render(&self, request: &ChartRequest) -> Result<PathBuf, ChartError> {
        if request.points.is_empty() {
            return Err(ChartError::EmptyCurve);
        }
        let path = &self.config.output;
        let existed = path.exists();

        // Surface an unwritable destination before drawing, leaving any
        // existing file intact.
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| ChartError::io(path, e))?;

        let result = font::ensure_registered(self.config.font_path.as_deref())
            .and_then(|()| self.draw_to(path, request));
        if let Err(e) = result {
            if !existed {
                let _ = fs::remove_file(path);
            }
            return Err(e);
        }

        info!(path = %path.display(), points = request.points.len(), "Payoff chart written");
        Ok(path.clone())
    }
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, request: &ChartRequest) -> Result<(), ChartError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(ChartError::render)?;

    let (x_min, x_max) = request.x_range();
    let (y_min, y_max) = request.y_range();

    let mut chart = ChartBuilder::on(root)
        .caption(&request.title, (FONT_FAMILY, 26))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(100)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .x_desc("Settlement index (points)")
        .y_desc("Profit / loss (NT$)")
        .x_label_formatter(&|x| format_thousands(*x, 0))
        .y_label_formatter(&|y| format_thousands(*y, 0))
        .light_line_style(BLACK.mix(0.05).stroke_width(1))
        .label_style((FONT_FAMILY, 14))
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(LineSeries::new(
            request.points.iter().map(|p| (p.settlement, p.pl_a)),
            BLUE.stroke_width(3),
        ))
        .map_err(ChartError::render)?
        .label(request.labels.first.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

    chart
        .draw_series(LineSeries::new(
            request.points.iter().map(|p| (p.settlement, p.pl_b)),
            RED.stroke_width(3),
        ))
        .map_err(ChartError::render)?
        .label(request.labels.second.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    // dashed zero line: every other segment of an evenly split axis
    let dash = (x_max - x_min) / (ZERO_LINE_DASHES as f64);
    chart
        .draw_series((0..ZERO_LINE_DASHES).step_by(2).map(|i| {
            let start = x_min + dash * i as f64;
            PathElement::new(
                vec![(start, 0.0), (start + dash, 0.0)],
                BLACK.mix(0.7).stroke_width(1),
            )
        }))
        .map_err(ChartError::render)?;

    chart
        .draw_series(LineSeries::new(
            vec![(request.strike, y_min), (request.strike, y_max)],
            STRIKE_GREY.stroke_width(2),
        ))
        .map_err(ChartError::render)?
        .label(format!("Strike {}", format_thousands(request.strike, 0)))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], STRIKE_GREY.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT_FAMILY, 14))
        .background_style(WHITE.mix(0.85).filled())
        .border_style(BLACK.stroke_width(1))
        .draw()
        .map_err(ChartError::render)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.output, PathBuf::from("txo_profit_curve.png"));
        assert_eq!((config.width, config.height), (1200, 700));
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_svg_detection() {
        assert!(is_svg(Path::new("curve.svg")));
        assert!(is_svg(Path::new("out/Curve.SVG")));
        assert!(!is_svg(Path::new("curve.png")));
        assert!(!is_svg(Path::new("curve")));
    }
}
