//! CLI mode implementations
//!
//! - `quote`: flag-driven single pass
//! - `interactive`: prompt-driven session with a settlement query loop

pub mod interactive;
pub mod quote;

use std::io::Write;
use std::path::PathBuf;

use tracing::info;
use txo_chart::{ChartRequest, CurveRenderer};
use txo_core::{CurveConfig, PayoffCurve, PayoffModel, PositionPair};

use crate::Result;

/// Sample the comparison curve, hand it to the renderer and report the file.
pub fn render_chart<W: Write>(
    model: &PayoffModel,
    pair: &PositionPair,
    curve_config: &CurveConfig,
    renderer: &dyn CurveRenderer,
    out: &mut W,
) -> Result<PathBuf> {
    let curve = PayoffCurve::new(*model, *pair, *curve_config);
    info!(
        points = curve.len(),
        half_range = curve_config.half_range,
        step = curve_config.step,
        "Sampled payoff curve"
    );

    let path = renderer.render(&ChartRequest::from_curve(&curve))?;
    writeln!(out, "\nChart saved to: {}", path.display())?;
    Ok(path)
}
