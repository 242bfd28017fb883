//! Error types for the TXO CLI.

use thiserror::Error;
use txo_chart::ChartError;
use txo_core::PayoffError;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or conflicting command-line arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Position or payoff validation error
    #[error("{0}")]
    Payoff(#[from] PayoffError),

    /// Chart rendering error
    #[error("{0}")]
    Chart(#[from] ChartError),

    /// Terminal I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input ended before the position was fully entered
    #[error("Input closed before the position was fully entered")]
    InputClosed,
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("--month is required");
        assert_eq!(err.to_string(), "Invalid argument: --month is required");

        let err: CliError = PayoffError::InvalidLots(0).into();
        assert!(err.to_string().contains("Invalid lots"));
    }
}
