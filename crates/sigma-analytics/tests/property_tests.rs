//! Property-based tests for metric invariants.
//!
//! These hold for every return series:
//! - Max drawdown is never positive and the Ulcer Index never negative
//! - CVaR never exceeds VaR, and VaR is the interpolated empirical quantile
//! - Zero variance makes Sharpe undefined, never infinite
//! - Without losses, Sortino and semi-deviation are undefined
//! - A table gives each asset the value it would get alone

use proptest::prelude::*;
use sigma_analytics::prelude::*;
use sigma_core::{Date, ReturnTable, TimeSeries};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn to_series(values: Vec<f64>) -> TimeSeries {
    let start = Date::from_ymd(2020, 1, 1).unwrap();
    let dates = (0..values.len() as i64).map(|i| start.add_days(i)).collect();
    TimeSeries::new(dates, values).unwrap()
}

/// Daily returns between -50% and +50%.
fn returns_strategy(min_len: usize) -> impl Strategy<Value = TimeSeries> {
    prop::collection::vec(-0.5..0.5f64, min_len..200).prop_map(to_series)
}

fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Empirical quantile by rank position q(n - 1), interpolating linearly.
fn reference_quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
}

// =============================================================================
// DRAWDOWN
// =============================================================================

proptest! {
    #[test]
    fn prop_max_drawdown_never_positive(r in returns_strategy(1)) {
        let mdd = max_drawdown(&r, &MetricsConfig::default());
        prop_assert!(mdd <= 0.0);
        prop_assert!(mdd >= -1.0);
    }

    #[test]
    fn prop_ulcer_index_never_negative(r in returns_strategy(1)) {
        let ulcer = ulcer_index(&r, &MetricsConfig::default());
        let mdd = max_drawdown(&r, &MetricsConfig::default());
        prop_assert!(ulcer >= 0.0);
        // RMS of the path never exceeds its largest magnitude
        prop_assert!(ulcer <= -mdd + 1e-12);
    }

    #[test]
    fn prop_drawdown_series_matches_max(r in returns_strategy(1)) {
        let path = drawdown_series(&r);
        prop_assert_eq!(path.len(), r.len());
        let min = path.values().iter().copied().fold(f64::NAN, f64::min);
        prop_assert_eq!(min, max_drawdown(&r, &MetricsConfig::default()));
    }
}

// =============================================================================
// TAIL RISK
// =============================================================================

proptest! {
    #[test]
    fn prop_cvar_at_most_var(r in returns_strategy(1), confidence in 0.5..0.999f64) {
        let config = MetricsConfig::default().with_confidence(confidence);
        let var = value_at_risk(&r, &config);
        let cvar = conditional_value_at_risk(&r, &config);
        prop_assert!(cvar <= var + 1e-15);
    }

    #[test]
    fn prop_var_is_empirical_quantile(r in returns_strategy(2)) {
        let var = value_at_risk(&r, &MetricsConfig::default());
        let expected = reference_quantile(r.values(), 0.05);
        prop_assert!((var - expected).abs() < 1e-12);
    }

    #[test]
    fn prop_constant_returns_tail_is_the_value(value in -0.1..0.1f64, n in 1usize..50) {
        let r = to_series(vec![value; n]);
        let config = MetricsConfig::default();
        prop_assert_eq!(value_at_risk(&r, &config), value);
        prop_assert_eq!(conditional_value_at_risk(&r, &config), value);
    }
}

// =============================================================================
// UNDEFINED RATIOS
// =============================================================================

proptest! {
    #[test]
    fn prop_zero_variance_sharpe_is_nan(value in -0.1..0.1f64, n in 2usize..50, rate in 0.0..0.2f64) {
        let r = to_series(vec![value; n]);
        let sharpe = sharpe_ratio(&r, &RiskFree::Annual(rate), &MetricsConfig::default());
        prop_assert!(sharpe.is_nan());
    }

    #[test]
    fn prop_no_losses_means_no_downside(
        values in prop::collection::vec(0.0..0.5f64, 2..100),
        rate in 0.0..0.2f64,
    ) {
        let r = to_series(values);
        let config = MetricsConfig::default();
        prop_assert!(sortino_ratio(&r, &RiskFree::Annual(rate), &config).is_nan());
        prop_assert!(semi_deviation(&r, &config).is_nan());
    }

    #[test]
    fn prop_dispersion_never_negative(r in returns_strategy(2)) {
        let config = MetricsConfig::default();
        prop_assert!(volatility(&r, &config) >= 0.0);
        prop_assert!(mean_absolute_deviation(&r, &config) >= 0.0);
    }
}

// =============================================================================
// ASSET INDEPENDENCE
// =============================================================================

proptest! {
    #[test]
    fn prop_table_columns_match_single_series(
        columns in prop::collection::vec(prop::collection::vec(-0.2..0.2f64, 30), 1..6),
        rate in 0.0..0.15f64,
    ) {
        let series: Vec<(String, TimeSeries)> = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("ASSET{i}"), to_series(c)))
            .collect();
        let table = ReturnTable::from_series(series.clone()).unwrap();
        let risk_free = RiskFree::Annual(rate);
        let config = MetricsConfig::default().with_threshold(2);

        for metric in MetricKind::ALL {
            let values = metric.compute(&table, &risk_free, &config);
            for (asset, s) in &series {
                let alone = metric.compute(s, &risk_free, &config);
                prop_assert!(same(values.get(asset).unwrap(), alone), "{} {}", metric, asset);
            }
        }
    }
}
