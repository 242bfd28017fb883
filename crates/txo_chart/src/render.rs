//! Curve rendering capability.
//!
//! Orchestration code talks to [`CurveRenderer`] only, so it can be driven
//! with a fake in tests and with [`crate::PlottersRenderer`] in production.

use std::path::PathBuf;

use txo_core::{CurvePoint, PayoffCurve, PositionPair};

use crate::error::ChartError;
use crate::format::{format_points, format_thousands};

/// Legend labels for the two compared premiums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLabels {
    /// First (monthly) leg
    pub first: String,
    /// Second (weekly) leg
    pub second: String,
}

impl SeriesLabels {
    /// Monthly/weekly labels carrying each premium.
    pub fn for_pair(pair: &PositionPair) -> Self {
        Self {
            first: format!("Monthly ({} pts)", format_points(pair.first().premium())),
            second: format!("Weekly ({} pts)", format_points(pair.second().premium())),
        }
    }
}

/// Everything a renderer needs to draw one comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    /// Sampled curve, ordered by settlement
    pub points: Vec<CurvePoint>,
    /// Legend labels
    pub labels: SeriesLabels,
    /// Strike marker position
    pub strike: f64,
    /// Chart title
    pub title: String,
}

impl ChartRequest {
    /// Builds a request from a sampled curve.
    pub fn from_curve(curve: &PayoffCurve) -> Self {
        let pair = curve.pair();
        Self {
            points: curve.points(),
            labels: SeriesLabels::for_pair(pair),
            strike: pair.strike(),
            title: format!(
                "TXO Buy {} P&L Curve | Strike {} pts | {} lot(s)",
                pair.option_type(),
                format_thousands(pair.strike(), 0),
                pair.lots()
            ),
        }
    }

    /// Settlement axis bounds. A single point is widened around itself.
    pub fn x_range(&self) -> (f64, f64) {
        let lo = self.points.first().map_or(self.strike, |p| p.settlement);
        let hi = self.points.last().map_or(self.strike, |p| p.settlement);
        let (lo, hi) = (lo.min(self.strike), hi.max(self.strike));
        if hi - lo < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        }
    }

    /// Profit/loss axis bounds, always including zero, padded by 8%.
    pub fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .points
            .iter()
            .flat_map(|p| [p.pl_a, p.pl_b])
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let span = hi - lo;
        if span < f64::EPSILON {
            return (lo - 1.0, hi + 1.0);
        }
        let pad = span * 0.08;
        (lo - pad, hi + pad)
    }
}

/// Renders a payoff chart to an artifact and returns where it was written.
pub trait CurveRenderer {
    /// Draw the chart.
    ///
    /// # Errors
    /// `ChartError::Io` when the destination cannot be written.
    fn render(&self, request: &ChartRequest) -> Result<PathBuf, ChartError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use txo_core::{sample_curve, CurveConfig, OptionType, PayoffModel};

    fn request(config: CurveConfig) -> ChartRequest {
        let curve = sample_curve(
            &PayoffModel::default(),
            17_000.0,
            150.0,
            60.0,
            1,
            OptionType::Put,
            &config,
        )
        .unwrap();
        ChartRequest::from_curve(&curve)
    }

    #[test]
    fn test_from_curve() {
        let req = request(CurveConfig::default());
        assert_eq!(req.points.len(), 161);
        assert_eq!(req.strike, 17_000.0);
        assert_eq!(req.labels.first, "Monthly (150 pts)");
        assert_eq!(req.labels.second, "Weekly (60 pts)");
        assert!(req.title.contains("Buy Put"));
        assert!(req.title.contains("17,000"));
    }

    #[test]
    fn test_ranges() {
        let req = request(CurveConfig::default());
        assert_eq!(req.x_range(), (16_200.0, 17_800.0));
        let (lo, hi) = req.y_range();
        // worst case is the full monthly premium, best is 800 - 60 points
        assert!(lo < -150.0 * 50.0);
        assert!(hi > (800.0 - 60.0) * 50.0);
    }

    #[test]
    fn test_single_point_ranges() {
        let req = request(CurveConfig {
            half_range: 0.0,
            step: 10.0,
        });
        assert_eq!(req.x_range(), (16_999.0, 17_001.0));
        let (lo, hi) = req.y_range();
        assert!(lo < hi);
    }
}
