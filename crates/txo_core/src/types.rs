//! Option side, contract and position types.
//!
//! This module provides:
//! - `OptionType`: Closed Call/Put enumeration resolved once at input boundaries
//! - `ContractSpec`: Contract multiplier (currency per index point per lot)
//! - `OptionPosition`: Validated, immutable buyer-side position
//! - `PositionPair`: Two positions sharing strike, lots and side, differing in premium

use std::fmt;
use std::str::FromStr;

use crate::error::PayoffError;

/// TAIFEX TXO contract multiplier: NT$50 per index point.
pub const TXO_MULTIPLIER: f64 = 50.0;

/// Option side.
///
/// # Examples
/// ```
/// use txo_core::OptionType;
///
/// let side: OptionType = "P".parse().unwrap();
/// assert_eq!(side, OptionType::Put);
/// assert_eq!(side.intrinsic(16_700.0, 17_000.0), 300.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy: pays max(S - K, 0)
    #[default]
    Call,
    /// Right to sell: pays max(K - S, 0)
    Put,
}

impl OptionType {
    /// Intrinsic value at expiry for the given settlement and strike.
    #[inline]
    pub fn intrinsic(&self, settlement: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (settlement - strike).max(0.0),
            OptionType::Put => (strike - settlement).max(0.0),
        }
    }

    /// Display name used in summaries and chart titles.
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(PayoffError::invalid_choice(s)),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Contract specification.
///
/// Carries the multiplier injected into [`crate::PayoffModel`]. The
/// default is the TXO contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractSpec {
    multiplier: f64,
}

impl ContractSpec {
    /// Creates a contract specification with validation.
    ///
    /// # Errors
    /// `PayoffError::InvalidMultiplier` if the multiplier is not positive and finite.
    pub fn new(multiplier: f64) -> Result<Self, PayoffError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(PayoffError::InvalidMultiplier(multiplier));
        }
        Ok(Self { multiplier })
    }

    /// The TAIFEX TXO contract (NT$50 per point).
    pub const fn txo() -> Self {
        Self {
            multiplier: TXO_MULTIPLIER,
        }
    }

    /// Currency value per index point per lot.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Default for ContractSpec {
    fn default() -> Self {
        Self::txo()
    }
}

/// Rejects non-finite or negative price fields.
pub(crate) fn check_price(field: &'static str, value: f64) -> Result<f64, PayoffError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PayoffError::invalid_input(field, value));
    }
    Ok(value)
}

pub(crate) fn check_lots(lots: u32) -> Result<u32, PayoffError> {
    if lots < 1 {
        return Err(PayoffError::InvalidLots(lots));
    }
    Ok(lots)
}

/// Buyer-side option position.
///
/// Immutable once constructed; all fields are validated by [`OptionPosition::new`].
///
/// # Examples
/// ```
/// use txo_core::{OptionPosition, OptionType};
///
/// let pos = OptionPosition::new(17_000.0, 150.0, 2, OptionType::Put).unwrap();
/// assert_eq!(pos.lots(), 2);
///
/// assert!(OptionPosition::new(17_000.0, -1.0, 1, OptionType::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionPosition {
    strike: f64,
    premium: f64,
    lots: u32,
    option_type: OptionType,
}

impl OptionPosition {
    /// Creates a new position.
    ///
    /// # Arguments
    /// * `strike` - Strike in index points (finite, non-negative)
    /// * `premium` - Premium paid in index points (finite, non-negative)
    /// * `lots` - Contract count (at least 1)
    /// * `option_type` - Call or Put
    pub fn new(
        strike: f64,
        premium: f64,
        lots: u32,
        option_type: OptionType,
    ) -> Result<Self, PayoffError> {
        Ok(Self {
            strike: check_price("strike", strike)?,
            premium: check_price("premium", premium)?,
            lots: check_lots(lots)?,
            option_type,
        })
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the premium.
    #[inline]
    pub fn premium(&self) -> f64 {
        self.premium
    }

    /// Returns the lot count.
    #[inline]
    pub fn lots(&self) -> u32 {
        self.lots
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

/// Two positions at the same strike, lots and side with different premiums.
///
/// Used to compare a monthly and a weekly contract side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionPair {
    first: OptionPosition,
    second: OptionPosition,
}

impl PositionPair {
    /// Creates a validated pair.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        premium_a: f64,
        premium_b: f64,
        lots: u32,
    ) -> Result<Self, PayoffError> {
        Ok(Self {
            first: OptionPosition::new(strike, premium_a, lots, option_type)?,
            second: OptionPosition::new(strike, premium_b, lots, option_type)?,
        })
    }

    /// First leg (monthly).
    #[inline]
    pub fn first(&self) -> &OptionPosition {
        &self.first
    }

    /// Second leg (weekly).
    #[inline]
    pub fn second(&self) -> &OptionPosition {
        &self.second
    }

    /// Shared strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.first.strike
    }

    /// Shared lot count.
    #[inline]
    pub fn lots(&self) -> u32 {
        self.first.lots
    }

    /// Shared option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.first.option_type
    }
}
