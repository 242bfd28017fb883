//! Payoff error types.
//!
//! This module provides structured error handling for position
//! construction and profit/loss evaluation.

use thiserror::Error;

/// Payoff-related errors.
///
/// # Variants
/// - `InvalidInput`: A price field is non-finite or negative
/// - `InvalidLots`: Lot count below one
/// - `InvalidMultiplier`: Contract multiplier is not a positive finite number
/// - `InvalidChoice`: Option side text is not one of call/put/c/p
///
/// # Examples
/// ```
/// use txo_core::PayoffError;
///
/// let err = PayoffError::InvalidLots(0);
/// assert_eq!(format!("{}", err), "Invalid lots: 0 (must be at least 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoffError {
    /// A price field is non-finite or negative.
    #[error("Invalid input: {field} = {value}")]
    InvalidInput {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Lot count below one.
    #[error("Invalid lots: {0} (must be at least 1)")]
    InvalidLots(u32),

    /// Contract multiplier is not a positive finite number.
    #[error("Invalid multiplier: {0} (must be positive and finite)")]
    InvalidMultiplier(f64),

    /// Unrecognised option side.
    #[error("Invalid option type: {0:?} (expected call, put, c or p)")]
    InvalidChoice(String),
}

impl PayoffError {
    /// Create an invalid input error for a named field
    pub fn invalid_input(field: &'static str, value: f64) -> Self {
        Self::InvalidInput { field, value }
    }

    /// Create an invalid choice error
    pub fn invalid_choice(raw: impl Into<String>) -> Self {
        Self::InvalidChoice(raw.into())
    }
}
