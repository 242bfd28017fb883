//! Payoff curve sampling around the strike.
//!
//! A [`PayoffCurve`] evaluates both legs of a [`PositionPair`] over the grid
//! `strike - half_range + i * step` for `i = 0..=floor(2 * half_range / step)`.
//! Points are computed lazily and the curve can be iterated any number of
//! times with identical results.

use crate::error::PayoffError;
use crate::payoff::{PayoffModel, PayoffPoint};
use crate::types::{OptionType, PositionPair};

/// Tolerance absorbing float noise in `2 * half_range / step`.
const GRID_EPSILON: f64 = 1e-9;

/// Upper bound on the number of points a curve will sample.
pub const MAX_CURVE_POINTS: usize = 100_000;

/// Sampling grid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    /// Distance from the strike to either end of the grid, in points
    pub half_range: f64,
    /// Grid spacing in points
    pub step: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            half_range: 800.0,
            step: 10.0,
        }
    }
}

impl CurveConfig {
    /// Number of grid points, capped at [`MAX_CURVE_POINTS`].
    ///
    /// A negative or non-finite range, or a non-positive or non-finite step,
    /// yields an empty grid.
    pub fn point_count(&self) -> usize {
        match self.intervals() {
            None => 0,
            Some(n) if n >= (MAX_CURVE_POINTS - 1) as f64 => MAX_CURVE_POINTS,
            Some(n) => n as usize + 1,
        }
    }

    /// Whether the grid holds more points than [`MAX_CURVE_POINTS`].
    pub fn exceeds_limit(&self) -> bool {
        self.intervals()
            .is_some_and(|n| n >= MAX_CURVE_POINTS as f64)
    }

    fn intervals(&self) -> Option<f64> {
        if !self.half_range.is_finite() || self.half_range < 0.0 {
            return None;
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return None;
        }
        let intervals = (2.0 * self.half_range / self.step + GRID_EPSILON).floor();
        // range/step can still overflow to infinity
        Some(if intervals.is_finite() { intervals } else { f64::MAX })
    }
}

/// One sample of the comparison curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CurvePoint {
    /// Settlement index value
    pub settlement: f64,
    /// Profit/loss of the first leg
    pub pl_a: f64,
    /// Profit/loss of the second leg
    pub pl_b: f64,
}

impl CurvePoint {
    /// First leg as a [`PayoffPoint`].
    pub fn first(&self) -> PayoffPoint {
        PayoffPoint {
            settlement: self.settlement,
            profit_loss: self.pl_a,
        }
    }

    /// Second leg as a [`PayoffPoint`].
    pub fn second(&self) -> PayoffPoint {
        PayoffPoint {
            settlement: self.settlement,
            profit_loss: self.pl_b,
        }
    }
}

/// Finite, restartable payoff curve for a position pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffCurve {
    model: PayoffModel,
    pair: PositionPair,
    config: CurveConfig,
}

impl PayoffCurve {
    /// Creates a curve over the configured grid.
    pub fn new(model: PayoffModel, pair: PositionPair, config: CurveConfig) -> Self {
        Self {
            model,
            pair,
            config,
        }
    }

    /// The positions being compared.
    pub fn pair(&self) -> &PositionPair {
        &self.pair
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.config.point_count()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the curve from the lowest settlement upwards.
    pub fn iter(&self) -> CurvePoints {
        CurvePoints {
            curve: *self,
            next: 0,
            end: self.len(),
        }
    }

    /// Collects all points.
    pub fn points(&self) -> Vec<CurvePoint> {
        self.iter().collect()
    }

    fn point_at(&self, index: usize) -> CurvePoint {
        let settlement =
            self.pair.strike() - self.config.half_range + index as f64 * self.config.step;
        let eval = |premium: f64| {
            self.model.unchecked_profit_loss(
                settlement,
                self.pair.strike(),
                premium,
                self.pair.lots(),
                self.pair.option_type(),
            )
        };
        CurvePoint {
            settlement,
            pl_a: eval(self.pair.first().premium()),
            pl_b: eval(self.pair.second().premium()),
        }
    }
}

impl<'a> IntoIterator for &'a PayoffCurve {
    type Item = CurvePoint;
    type IntoIter = CurvePoints;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`PayoffCurve`].
#[derive(Debug, Clone)]
pub struct CurvePoints {
    curve: PayoffCurve,
    next: usize,
    end: usize,
}

impl Iterator for CurvePoints {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let point = self.curve.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurvePoints {}

/// Samples the comparison curve for two premiums at the same strike.
///
/// # Errors
/// Propagates position validation failures (`InvalidInput`, `InvalidLots`).
/// Degenerate grids are not errors: they produce zero or one point.
///
/// # Examples
/// ```
/// use txo_core::{sample_curve, CurveConfig, OptionType, PayoffModel};
///
/// let curve = sample_curve(
///     &PayoffModel::default(),
///     17_000.0,
///     150.0,
///     60.0,
///     1,
///     OptionType::Call,
///     &CurveConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(curve.len(), 161);
/// ```
pub fn sample_curve(
    model: &PayoffModel,
    strike: f64,
    premium_a: f64,
    premium_b: f64,
    lots: u32,
    option_type: OptionType,
    config: &CurveConfig,
) -> Result<PayoffCurve, PayoffError> {
    let pair = PositionPair::new(option_type, strike, premium_a, premium_b, lots)?;
    Ok(PayoffCurve::new(*model, pair, *config))
}
