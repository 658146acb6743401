//! # Sigma Math
//!
//! Numerical building blocks for the Sigma risk metrics engine.
//!
//! - **Statistics**: mean, sample standard deviation, bias-corrected
//!   skewness and excess kurtosis, mean absolute deviation, correlation
//! - **Quantiles**: empirical quantiles interpolated between order statistics
//! - **Interpolation**: the linear interpolator the quantiles are read from
//!
//! Degenerate samples produce `NaN`, never a panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod interpolation;
pub mod quantile;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator};
    pub use crate::quantile::quantile;
    pub use crate::statistics::{
        correlation, is_constant, kurtosis, mean, mean_absolute_deviation, skewness, std_dev,
    };
}

pub use error::{MathError, MathResult};
pub use quantile::quantile;
