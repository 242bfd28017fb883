//! TXO CLI - Option Buyer Profit/Loss Calculator
//!
//! Computes expiry profit/loss and breakevens for buying TAIFEX index
//! options (TXO), comparing a monthly and a weekly premium at the same
//! strike, and optionally draws the payoff curves.
//!
//! # Modes
//!
//! - `txo -k 17000 -m 150 -w 60 [-t put] [-l 2] [--plot]` - flag-driven single pass
//! - `txo` - interactive prompts with a settlement query loop
//!
//! # Architecture
//!
//! As the service layer, this crate wires configuration and logging
//! around `txo_core` (payoff model) and `txo_chart` (presentation).

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use txo_chart::PlottersRenderer;
use txo_core::{OptionType, PayoffModel};

mod commands;
mod config;
mod error;

use commands::interactive::InteractiveSession;
use commands::quote::{self, QuoteArgs};
use config::{CliOverrides, LogLevel};
pub use error::{CliError, Result};

/// Option side as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    #[value(alias = "c")]
    Call,
    #[value(alias = "p")]
    Put,
}

impl From<Side> for OptionType {
    fn from(side: Side) -> Self {
        match side {
            Side::Call => OptionType::Call,
            Side::Put => OptionType::Put,
        }
    }
}

/// TXO option buyer profit/loss calculator
#[derive(Parser, Debug)]
#[command(name = "txo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Buy a call or a put
    #[arg(short = 't', long = "type", value_enum, default_value_t = Side::Call)]
    side: Side,

    /// Strike price in index points (omit for interactive mode)
    #[arg(short = 'k', long)]
    strike: Option<f64>,

    /// Monthly option premium in points
    #[arg(short, long)]
    month: Option<f64>,

    /// Weekly option premium in points
    #[arg(short, long)]
    week: Option<f64>,

    /// Number of lots
    #[arg(short, long, default_value_t = 1)]
    lots: u32,

    /// Write the payoff curve chart
    #[arg(long)]
    plot: bool,

    /// Chart file (.png or .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Curve half-range around the strike, in points
    #[arg(long)]
    range: Option<f64>,

    /// Curve sampling step, in points
    #[arg(long)]
    step: Option<f64>,

    /// Configuration file path (defaults to ./txo.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            output: self.output.clone(),
            half_range: self.range,
            step: self.step,
            verbose: self.verbose,
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(&cli.overrides())?;
    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    let model = PayoffModel::new(config.contract_spec()?);
    let renderer = PlottersRenderer::new(config.chart.clone());

    match cli.strike {
        None => {
            info!("No strike given, starting interactive mode");
            let stdin = io::stdin();
            InteractiveSession::new(
                stdin.lock(),
                io::stdout(),
                &model,
                &config.curve,
                &renderer,
            )
            .run()
        }
        Some(strike) => {
            let args = QuoteArgs {
                option_type: cli.side.into(),
                strike,
                month: cli.month,
                week: cli.week,
                lots: cli.lots,
                plot: cli.plot,
            };
            quote::run(&args, &model, &config.curve, &renderer, &mut io::stdout())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_mode_parsing() {
        let cli = Cli::try_parse_from([
            "txo", "-t", "p", "-k", "17000", "-m", "150", "-w", "60", "-l", "2", "--plot",
        ])
        .unwrap();

        assert_eq!(OptionType::from(cli.side), OptionType::Put);
        assert_eq!(cli.strike, Some(17_000.0));
        assert_eq!(cli.month, Some(150.0));
        assert_eq!(cli.week, Some(60.0));
        assert_eq!(cli.lots, 2);
        assert!(cli.plot);
    }

    #[test]
    fn test_defaults_select_interactive_mode() {
        let cli = Cli::try_parse_from(["txo"]).unwrap();
        assert_eq!(cli.side, Side::Call);
        assert_eq!(cli.strike, None);
        assert_eq!(cli.lots, 1);
        assert!(!cli.plot);
    }

    #[test]
    fn test_side_aliases() {
        for (raw, expected) in [
            ("call", Side::Call),
            ("c", Side::Call),
            ("put", Side::Put),
            ("p", Side::Put),
        ] {
            let cli = Cli::try_parse_from(["txo", "--type", raw]).unwrap();
            assert_eq!(cli.side, expected);
        }
        assert!(Cli::try_parse_from(["txo", "--type", "straddle"]).is_err());
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        assert!(Cli::try_parse_from(["txo", "-k", "abc"]).is_err());
        assert!(Cli::try_parse_from(["txo", "-k", "17000", "-l", "-1"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "txo", "-o", "curve.svg", "--range", "400", "--step", "20", "-v",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.output, Some(PathBuf::from("curve.svg")));
        assert_eq!(overrides.half_range, Some(400.0));
        assert_eq!(overrides.step, Some(20.0));
        assert!(overrides.verbose);
    }
}
