//! Dispersion metrics: volatility, semi-deviation, mean absolute deviation.

use sigma_math::statistics::{mean_absolute_deviation as mad, std_dev};

use crate::asset_series::AssetSeries;
use crate::config::MetricsConfig;

/// Annualized volatility.
///
/// ## Formula
///
/// ```text
/// σ_annual = std(r) × √periods_per_year
/// ```
///
/// `NaN` with fewer than two return observations.
pub fn volatility<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    let scale = config.annualization_scale();
    returns.map_assets(config, |r| std_dev(r) * scale)
}

/// Annualized semi-deviation: the volatility of losing periods only.
///
/// ## Formula
///
/// ```text
/// semi = std(r | r < 0) × √periods_per_year
/// ```
///
/// `NaN` with fewer than two negative observations.
pub fn semi_deviation<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    let scale = config.annualization_scale();
    returns.map_assets(config, |r| downside_std(r) * scale)
}

/// Mean absolute deviation of returns around their mean.
///
/// Defined (and `>= 0`) for any non-empty sample; `NaN` when empty.
pub fn mean_absolute_deviation<S: AssetSeries>(returns: &S, config: &MetricsConfig) -> S::Values {
    returns.map_assets(config, mad)
}

/// Sample standard deviation of the strictly negative returns.
///
/// Losses are judged on the raw return sign, not on the excess return.
pub(crate) fn downside_std(returns: &[f64]) -> f64 {
    let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    if losses.len() < 2 {
        return f64::NAN;
    }
    std_dev(&losses)
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
    fn test_volatility() {
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let vol = volatility(&r, &MetricsConfig::default());
        assert_relative_eq!(vol, (0.00067_f64 / 4.0).sqrt() * 252.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_volatility_needs_two_observations() {
        assert!(volatility(&series(&[0.01]), &MetricsConfig::default()).is_nan());
    }

    #[test]
    fn test_semi_deviation() {
        // losses -0.01 and -0.005: std = 0.005 / √2
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let semi = semi_deviation(&r, &MetricsConfig::default());
        assert_relative_eq!(
            semi,
            0.005 / 2.0_f64.sqrt() * 252.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_semi_deviation_undefined_without_losses() {
        let config = MetricsConfig::default();
        assert!(semi_deviation(&series(&[0.01, 0.02, 0.0]), &config).is_nan());
        // a single loss is not enough either
        assert!(semi_deviation(&series(&[0.01, -0.02, 0.03]), &config).is_nan());
    }

    #[test]
    fn test_zero_is_not_a_loss() {
        assert!(downside_std(&[0.0, 0.0, -0.01]).is_nan());
    }

    #[test]
    fn test_mean_absolute_deviation() {
        let r = series(&[0.01, 0.02, -0.01, 0.015, -0.005]);
        let value = mean_absolute_deviation(&r, &MetricsConfig::default());
        assert_relative_eq!(value, 0.0108, epsilon = 1e-12);
        assert!(value >= 0.0);
    }
}
