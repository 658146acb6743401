//! Error types for the Sigma engine.
//!
//! Two kinds of failure surface as errors: malformed input and calling a
//! dependent step before its prerequisite. A metric that is mathematically
//! undefined for a sample is not an error; it is reported as `NaN`.

use thiserror::Error;

/// A specialized Result type for Sigma operations.
pub type SigmaResult<T> = Result<T, SigmaError>;

/// The main error type for Sigma operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigmaError {
    /// Malformed or insufficient input, e.g. a single-point price series.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what is wrong with the input.
        reason: String,
    },

    /// A dependent step was invoked before its prerequisite.
    #[error("Not computed: {operation} requires a prior computation")]
    NotComputed {
        /// The operation that was called too early.
        operation: String,
    },

    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl SigmaError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a not computed error.
    #[must_use]
    pub fn not_computed(operation: impl Into<String>) -> Self {
        Self::NotComputed {
            operation: operation.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an insufficient data error for a named series.
    #[must_use]
    pub fn insufficient_data(series: impl AsRef<str>, required: usize, actual: usize) -> Self {
        Self::InvalidInput {
            reason: format!(
                "'{}' needs at least {required} points, got {actual}",
                series.as_ref()
            ),
        }
    }
}
