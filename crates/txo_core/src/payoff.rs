//! Expiry profit/loss and breakeven for buyer-side positions.
//!
//! The buyer pays the premium up front and receives the intrinsic value
//! at settlement:
//!
//! ```text
//! P&L = (intrinsic(S, K) - premium) * multiplier * lots
//! ```

use crate::error::PayoffError;
use crate::types::{check_lots, check_price, ContractSpec, OptionPosition, OptionType};

/// A single settlement and the resulting profit/loss.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PayoffPoint {
    /// Settlement index value
    pub settlement: f64,
    /// Profit/loss in contract currency
    pub profit_loss: f64,
}

/// Expiry payoff model.
///
/// Holds the contract multiplier; every evaluation is otherwise pure.
///
/// # Examples
/// ```
/// use txo_core::{ContractSpec, OptionType, PayoffModel};
///
/// let model = PayoffModel::new(ContractSpec::txo());
/// let pl = model
///     .profit_loss(16_700.0, 17_000.0, 150.0, 2, OptionType::Put)
///     .unwrap();
/// assert_eq!(pl, 15_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayoffModel {
    contract: ContractSpec,
}

impl PayoffModel {
    /// Creates a model for the given contract.
    pub fn new(contract: ContractSpec) -> Self {
        Self { contract }
    }

    /// Returns the multiplier.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        self.contract.multiplier()
    }

    /// Profit/loss at expiry.
    ///
    /// # Arguments
    /// * `settlement` - Settlement index (finite)
    /// * `strike` - Strike (finite, non-negative)
    /// * `premium` - Premium paid in points (finite, non-negative)
    /// * `lots` - Contract count (at least 1)
    /// * `option_type` - Call or Put
    ///
    /// # Errors
    /// `PayoffError::InvalidLots` for zero lots, `PayoffError::InvalidInput`
    /// for a bad strike, premium or settlement.
    pub fn profit_loss(
        &self,
        settlement: f64,
        strike: f64,
        premium: f64,
        lots: u32,
        option_type: OptionType,
    ) -> Result<f64, PayoffError> {
        check_lots(lots)?;
        let strike = check_price("strike", strike)?;
        let premium = check_price("premium", premium)?;
        if !settlement.is_finite() {
            return Err(PayoffError::invalid_input("settlement", settlement));
        }
        Ok(self.unchecked_profit_loss(settlement, strike, premium, lots, option_type))
    }

    /// Profit/loss of a validated position at the given settlement.
    pub fn position_profit_loss(
        &self,
        position: &OptionPosition,
        settlement: f64,
    ) -> Result<PayoffPoint, PayoffError> {
        if !settlement.is_finite() {
            return Err(PayoffError::invalid_input("settlement", settlement));
        }
        Ok(PayoffPoint {
            settlement,
            profit_loss: self.unchecked_profit_loss(
                settlement,
                position.strike(),
                position.premium(),
                position.lots(),
                position.option_type(),
            ),
        })
    }

    /// Total premium outlay in contract currency.
    pub fn total_cost(&self, position: &OptionPosition) -> f64 {
        position.premium() * self.multiplier() * f64::from(position.lots())
    }

    #[inline]
    pub(crate) fn unchecked_profit_loss(
        &self,
        settlement: f64,
        strike: f64,
        premium: f64,
        lots: u32,
        option_type: OptionType,
    ) -> f64 {
        let intrinsic = option_type.intrinsic(settlement, strike);
        (intrinsic - premium) * self.multiplier() * f64::from(lots)
    }
}

/// Settlement at which the position neither gains nor loses.
///
/// `strike + premium` for a call, `strike - premium` for a put.
///
/// # Examples
/// ```
/// use txo_core::{breakeven, OptionType};
///
/// assert_eq!(breakeven(17_000.0, 150.0, OptionType::Call), 17_150.0);
/// assert_eq!(breakeven(17_000.0, 150.0, OptionType::Put), 16_850.0);
/// ```
#[inline]
pub fn breakeven(strike: f64, premium: f64, option_type: OptionType) -> f64 {
    match option_type {
        OptionType::Call => strike + premium,
        OptionType::Put => strike - premium,
    }
}
