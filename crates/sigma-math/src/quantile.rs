//! Empirical quantiles.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolator, LinearInterpolator};

/// Returns the `q`-quantile of `values`.
///
/// Historical (empirical) method: the sample is sorted and the quantile is
/// read at rank position `q * (n - 1)`, interpolating linearly between the
/// two neighbouring order statistics.
///
/// An empty sample yields `NaN`. A single observation is every quantile.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if `q` is outside `[0, 1]` or the
/// sample contains `NaN`.
///
/// # Example
///
/// ```rust
/// use sigma_math::quantile;
///
/// let q = quantile(&[4.0, 1.0, 3.0, 2.0], 0.5).unwrap();
/// assert!((q - 2.5).abs() < 1e-12);
/// ```
pub fn quantile(values: &[f64], q: f64) -> MathResult<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must be in [0, 1], got {q}"
        )));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("sample contains NaN"));
    }

    match values.len() {
        0 => Ok(f64::NAN),
        1 => Ok(values[0]),
        n => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);

            let ranks = (0..n).map(|i| i as f64).collect();
            let order_statistics = LinearInterpolator::new(ranks, sorted)?;
            order_statistics.interpolate(q * (n - 1) as f64)
        }
    }
}
