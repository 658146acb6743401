//! Drawdown metrics: the drawdown path, its minimum, and the Ulcer Index.
//!
//! Returns are compounded into a wealth path starting at 1:
//!
//! ```text
//! W[t]  = Π (1 + r[i]),  i <= t
//! P[t]  = max(1, W[0..=t])
//! DD[t] = (W[t] - P[t]) / P[t]
//! ```
//!
//! The starting value counts as a peak, so a loss in the first period is
//! already a drawdown.

use sigma_core::TimeSeries;

use crate::asset_series::AssetSeries;
use crate::config::MetricsConfig;

/// Maximum drawdown: the most negative point of the drawdown path.
///
/// Always `<= 0`, and exactly `0` when wealth never falls below a prior
/// peak. `NaN` for an empty series.
pub fn max_drawdown<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    returns.map_assets(config, |r| {
        drawdown_path(r).into_iter().fold(f64::NAN, f64::min)
    })
}

/// Ulcer Index: root-mean-square of the full drawdown path.
///
/// Always `>= 0`. `NaN` for an empty series.
pub fn ulcer_index<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    returns.map_assets(config, ulcer)
}

/// Drawdown at every return date.
#[must_use]
pub fn drawdown_series(returns: &TimeSeries) -> TimeSeries {
    let path = drawdown_path(returns.values());
    returns.map_rows(|i, _| path[i])
}

pub(crate) fn drawdown_path(returns: &[f64]) -> Vec<f64> {
    let mut wealth = 1.0;
    let mut peak = 1.0_f64;
    returns
        .iter()
        .map(|r| {
            wealth *= 1.0 + r;
            peak = peak.max(wealth);
            (wealth - peak) / peak
        })
        .collect()
}

fn ulcer(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return f64::NAN;
    }
    let path = drawdown_path(returns);
    let mean_sq = path.iter().map(|d| d * d).sum::<f64>() / path.len() as f64;
    mean_sq.sqrt()
}
