//! Error types for portfolio aggregation.

use sigma_core::SigmaError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Malformed input or an out-of-order call in the metrics layer.
    #[error(transparent)]
    Sigma(#[from] SigmaError),

    /// Weights cancel out, so they cannot be normalized.
    #[error("Weights sum to zero and cannot be normalized")]
    ZeroWeightSum,

    /// A weight that is not a finite number.
    #[error("Invalid weight for asset '{asset}': {value}")]
    InvalidWeight {
        /// The asset identifier.
        asset: String,
        /// The offending weight.
        value: f64,
    },

    /// No asset in the price table carries a weight.
    #[error("Portfolio has no weighted asset with prices")]
    EmptyPortfolio,
}

impl PortfolioError {
    /// Creates an invalid weight error.
    #[must_use]
    pub fn invalid_weight(asset: impl Into<String>, value: f64) -> Self {
        Self::InvalidWeight {
            asset: asset.into(),
            value,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::Sigma(SigmaError::invalid_input(reason))
    }
}
