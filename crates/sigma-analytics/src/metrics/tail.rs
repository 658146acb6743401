//! Historical tail-risk metrics: VaR and CVaR.
//!
//! Both are read off the empirical return distribution with no
//! distributional assumption. Results are returns, so a loss-making
//! threshold is negative.

use sigma_math::quantile;
use sigma_math::statistics::mean;

use crate::asset_series::AssetSeries;
use crate::config::MetricsConfig;

/// Historical Value at Risk at `config.confidence`.
///
/// The `(1 - confidence)` quantile of returns, interpolating linearly
/// between order statistics. `NaN` only for an empty series.
pub fn value_at_risk<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    let level = 1.0 - config.confidence;
    returns.map_assets(config, |r| var(r, level))
}

/// Conditional Value at Risk (expected shortfall) at `config.confidence`.
///
/// The mean of every return at or below the VaR threshold, so it never
/// exceeds VaR. `NaN` when no return reaches the threshold.
pub fn conditional_value_at_risk<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    let level = 1.0 - config.confidence;
    returns.map_assets(config, |r| cvar(r, level))
}

pub(crate) fn var(returns: &[f64], level: f64) -> f64 {
    quantile(returns, level).unwrap_or(f64::NAN)
}

pub(crate) fn cvar(returns: &[f64], level: f64) -> f64 {
    let threshold = var(returns, level);
    if threshold.is_nan() {
        return f64::NAN;
    }
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= threshold).collect();
    if tail.is_empty() {
        return f64::NAN;
    }
    mean(&tail)
}
