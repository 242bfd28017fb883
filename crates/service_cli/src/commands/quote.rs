//! Flag-driven mode
//!
//! Computes both breakevens for the position given on the command line,
//! optionally renders the payoff chart, then exits.

use std::io::Write;

use tracing::info;
use txo_chart::{format_summary, CurveRenderer};
use txo_core::{breakeven, CurveConfig, OptionType, PayoffModel, PositionPair};

use super::render_chart;
use crate::{CliError, Result};

/// Position and actions taken from command-line flags
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteArgs {
    pub option_type: OptionType,
    pub strike: f64,
    pub month: Option<f64>,
    pub week: Option<f64>,
    pub lots: u32,
    pub plot: bool,
}

/// Run the flag-driven calculation
pub fn run<W: Write>(
    args: &QuoteArgs,
    model: &PayoffModel,
    curve_config: &CurveConfig,
    renderer: &dyn CurveRenderer,
    out: &mut W,
) -> Result<()> {
    let month = args
        .month
        .ok_or_else(|| CliError::invalid_argument("--month is required with --strike"))?;
    let week = args
        .week
        .ok_or_else(|| CliError::invalid_argument("--week is required with --strike"))?;

    let pair = PositionPair::new(args.option_type, args.strike, month, week, args.lots)?;
    info!(
        side = %pair.option_type(),
        strike = pair.strike(),
        lots = pair.lots(),
        "Flag-driven calculation"
    );

    let be_month = breakeven(pair.strike(), month, pair.option_type());
    let be_week = breakeven(pair.strike(), week, pair.option_type());

    writeln!(out, "\n=== TXO Buy {} P&L ===", pair.option_type())?;
    writeln!(out, "{}", format_summary(&pair, model, be_month, be_week))?;

    if args.plot {
        render_chart(model, &pair, curve_config, renderer, out)?;
    }

    Ok(())
}
