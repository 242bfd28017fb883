//! Interactive mode
//!
//! Prompts for side, strike, both premiums and lots, prints the summary,
//! then answers settlement queries until `q`, `quit`, an empty line or EOF.
//! Every malformed entry is reported and re-prompted; EOF before the
//! position is complete aborts the session.

use std::io::{BufRead, Write};

use tracing::{debug, warn};
use txo_chart::{format_settlement_line, format_summary, CurveRenderer};
use txo_core::{breakeven, CurveConfig, OptionType, PayoffModel, PositionPair};

use super::render_chart;
use crate::{CliError, Result};

const QUIT_WORDS: &[&str] = &["q", "quit", ""];

/// Prompt-driven calculator session over any line source and sink
pub struct InteractiveSession<'a, R, W> {
    input: R,
    output: W,
    model: &'a PayoffModel,
    curve_config: &'a CurveConfig,
    renderer: &'a dyn CurveRenderer,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        model: &'a PayoffModel,
        curve_config: &'a CurveConfig,
        renderer: &'a dyn CurveRenderer,
    ) -> Self {
        Self {
            input,
            output,
            model,
            curve_config,
            renderer,
        }
    }

    /// Run the whole session
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "=== TXO Option Buyer P&L Calculator ===")?;
        writeln!(
            self.output,
            "Contract multiplier: NT${} / point\n",
            self.model.multiplier()
        )?;

        let option_type = self.ask_option_type()?;
        let strike = self.ask_price("Strike (points): ")?;
        let month = self.ask_price("Monthly option premium (points): ")?;
        let week = self.ask_price("Weekly option premium (points): ")?;
        let lots = self.ask_lots()?;

        let pair = PositionPair::new(option_type, strike, month, week, lots)?;
        let be_month = breakeven(strike, month, option_type);
        let be_week = breakeven(strike, week, option_type);
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}",
            format_summary(&pair, self.model, be_month, be_week)
        )?;

        self.query_loop(&pair)?;

        if self.ask_yes_no("\nGenerate P&L curve chart? (y/n): ")? {
            render_chart(
                self.model,
                &pair,
                self.curve_config,
                self.renderer,
                &mut self.output,
            )?;
        }
        Ok(())
    }

    /// Write a prompt and read one trimmed line; `None` on EOF.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_required(&mut self, text: &str) -> Result<String> {
        self.prompt(text)?.ok_or(CliError::InputClosed)
    }

    fn ask_option_type(&mut self) -> Result<OptionType> {
        loop {
            let raw = self.prompt_required("Buy Call or Put? (c/p): ")?;
            match raw.parse::<OptionType>() {
                Ok(option_type) => return Ok(option_type),
                Err(e) => {
                    warn!(%e, "Rejected option type");
                    writeln!(self.output, "Please enter c or p!")?;
                }
            }
        }
    }

    fn ask_price(&mut self, text: &str) -> Result<f64> {
        loop {
            let raw = self.prompt_required(text)?;
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(value),
                Ok(value) => {
                    warn!(value, "Rejected out-of-range price");
                    writeln!(self.output, "Please enter a non-negative number.")?;
                }
                Err(_) => {
                    warn!(input = %raw, "Rejected non-numeric price");
                    writeln!(self.output, "Please enter a number.")?;
                }
            }
        }
    }

    fn ask_lots(&mut self) -> Result<u32> {
        loop {
            let raw = self.prompt_required("Lots [default 1]: ")?;
            if raw.is_empty() {
                return Ok(1);
            }
            match raw.parse::<u32>() {
                Ok(lots) if lots >= 1 => return Ok(lots),
                _ => {
                    warn!(input = %raw, "Rejected lot count");
                    writeln!(self.output, "Please enter a whole number of lots (1 or more).")?;
                }
            }
        }
    }

    fn query_loop(&mut self, pair: &PositionPair) -> Result<()> {
        loop {
            let Some(raw) = self.prompt("\nEnter settlement index (q to finish): ")? else {
                debug!("Input closed, leaving query loop");
                return Ok(());
            };
            if QUIT_WORDS.contains(&raw.to_lowercase().as_str()) {
                return Ok(());
            }

            let settlement = match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    writeln!(self.output, "Please enter a number or q to finish")?;
                    continue;
                }
            };

            let month = self.model.position_profit_loss(pair.first(), settlement)?;
            let week = self.model.position_profit_loss(pair.second(), settlement)?;
            writeln!(
                self.output,
                "{}",
                format_settlement_line(settlement, month.profit_loss, week.profit_loss)
            )?;
        }
    }

    fn ask_yes_no(&mut self, text: &str) -> Result<bool> {
        Ok(self
            .prompt(text)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
    }
}
