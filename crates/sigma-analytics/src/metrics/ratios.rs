//! Risk-adjusted return ratios: Sharpe and Sortino.
//!
//! The numerator is the mean excess return; the denominator is a
//! dispersion of the raw (effective) returns over the same rows. A zero or
//! missing denominator yields `NaN`, never an infinity or a substituted zero.

use sigma_math::statistics::{is_constant, mean, std_dev};

use super::dispersion::downside_std;
use crate::asset_series::AssetSeries;
use crate::config::MetricsConfig;
use crate::risk_free::{align, RiskFree};

/// Denominators at or below this are treated as zero.
const MIN_DENOMINATOR: f64 = 1e-12;

/// Annualized Sharpe ratio.
///
/// ## Formula
///
/// ```text
/// Sharpe = √periods_per_year × mean(r - r_f) / std(r)
/// ```
///
/// `NaN` when `std(r)` is zero or undefined.
pub fn sharpe_ratio<S: AssetSeries>(
    returns: &S,
    risk_free: &RiskFree,
    config: &MetricsConfig,
) -> S::Values {
    let scale = config.annualization_scale();
    let aligned = align(returns, risk_free, config.periods_per_year);
    aligned
        .excess
        .zip_assets(&aligned.effective, config, |excess, effective| {
            let sd = if is_constant(effective) {
                0.0
            } else {
                std_dev(effective)
            };
            ratio(scale * mean(excess), sd)
        })
}

/// Annualized Sortino ratio.
///
/// ## Formula
///
/// ```text
/// Sortino = √periods_per_year × mean(r - r_f) / std(r | r < 0)
/// ```
///
/// The downside filter uses the raw return sign: a loss is an absolute
/// loss, not underperformance of the risk-free rate. `NaN` with fewer than
/// two negative returns or zero downside deviation.
pub fn sortino_ratio<S: AssetSeries>(
    returns: &S,
    risk_free: &RiskFree,
    config: &MetricsConfig,
) -> S::Values {
    let scale = config.annualization_scale();
    let aligned = align(returns, risk_free, config.periods_per_year);
    aligned
        .excess
        .zip_assets(&aligned.effective, config, |excess, effective| {
            ratio(scale * mean(excess), downside_std(effective))
        })
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.is_finite() && denominator > MIN_DENOMINATOR {
        numerator / denominator
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sigma_core::{Date, TimeSeries};

    fn series(values: &[f64]) -> TimeSeries {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let dates = (0..values.len() as i64).map(|i| start.add_days(i)).collect();
        TimeSeries::new(dates, values.to_vec()).unwrap()
    }

    #[test]
    fn test_sharpe_zero_rate() {
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let sharpe = sharpe_ratio(&r, &RiskFree::default(), &MetricsConfig::default());
        let expected = 252.0_f64.sqrt() * 0.006 / (0.00067_f64 / 4.0).sqrt();
        assert_relative_eq!(sharpe, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_sharpe_annual_rate_lowers_numerator_only() {
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let config = MetricsConfig::default();
        let sharpe = sharpe_ratio(&r, &RiskFree::Annual(0.252), &config);
        let expected = 252.0_f64.sqrt() * (0.006 - 0.001) / (0.00067_f64 / 4.0).sqrt();
        assert_relative_eq!(sharpe, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_sharpe_zero_variance_is_nan() {
        let r = series(&[0.001; 10]);
        let sharpe = sharpe_ratio(&r, &RiskFree::default(), &MetricsConfig::default());
        assert!(sharpe.is_nan());
        assert!(!sharpe.is_infinite());
    }

    #[test]
    fn test_sortino() {
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let sortino = sortino_ratio(&r, &RiskFree::default(), &MetricsConfig::default());
        let expected = 252.0_f64.sqrt() * 0.006 / (0.005 / 2.0_f64.sqrt());
        assert_relative_eq!(sortino, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_sortino_undefined_without_losses() {
        let r = series(&[0.01, 0.02, 0.005, 0.0]);
        let sortino = sortino_ratio(&r, &RiskFree::Annual(0.5), &MetricsConfig::default());
        assert!(sortino.is_nan());
    }

    #[test]
    fn test_sortino_identical_losses_is_nan() {
        let r = series(&[0.01, -0.01, -0.01, 0.02]);
        assert!(sortino_ratio(&r, &RiskFree::default(), &MetricsConfig::default()).is_nan());
    }

    #[test]
    fn test_sortino_filters_on_raw_sign() {
        // all returns positive but below the risk-free rate: excess is
        // negative everywhere, yet there are no losses
        let r = series(&[0.0001, 0.0002, 0.0003]);
        let sortino = sortino_ratio(&r, &RiskFree::Annual(0.252), &MetricsConfig::default());
        assert!(sortino.is_nan());
    }

    #[test]
    fn test_empty_alignment_is_nan() {
        let r = series(&[0.01, -0.02, 0.03, -0.01]);
        let far = Date::from_ymd(2030, 1, 1).unwrap();
        let rates = TimeSeries::new(vec![far], vec![0.0001]).unwrap();
        let config = MetricsConfig::default();

        assert!(sharpe_ratio(&r, &RiskFree::Series(rates.clone()), &config).is_nan());
        assert!(sortino_ratio(&r, &RiskFree::Series(rates), &config).is_nan());
    }
}
