//! Error types for chart rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Chart error type
#[derive(Debug, Error)]
pub enum ChartError {
    /// Destination could not be opened or written
    #[error("Cannot write chart to {}: {source}", path.display())]
    Io {
        /// Chart destination
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No usable font for titles and labels
    #[error("No usable font found: {0}")]
    FontUnavailable(String),

    /// Nothing to plot
    #[error("Payoff curve has no points to plot")]
    EmptyCurve,

    /// Drawing backend failure
    #[error("Rendering error: {0}")]
    Render(String),
}

impl ChartError {
    /// Create an I/O error for a destination path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a rendering error
    pub fn render(msg: impl std::fmt::Display) -> Self {
        Self::Render(msg.to_string())
    }
}
