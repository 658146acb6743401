//! Metric calculators.
//!
//! Each calculator is a pure function generic over [`AssetSeries`]: a single
//! return series gives an `f64`, a return table gives one value per asset.
//! Undefined results are `NaN`; calculators never fail on degenerate data.
//!
//! - **Dispersion**: [`volatility`], [`semi_deviation`], [`mean_absolute_deviation`]
//! - **Ratios**: [`sharpe_ratio`], [`sortino_ratio`]
//! - **Drawdown**: [`max_drawdown`], [`ulcer_index`], [`drawdown_series`]
//! - **Tail**: [`value_at_risk`], [`conditional_value_at_risk`]

mod dispersion;
mod drawdown;
mod ratios;
mod tail;

pub use dispersion::{mean_absolute_deviation, semi_deviation, volatility};
pub use drawdown::{drawdown_series, max_drawdown, ulcer_index};
pub use ratios::{sharpe_ratio, sortino_ratio};
pub use tail::{conditional_value_at_risk, value_at_risk};

use serde::{Deserialize, Serialize};

use crate::asset_series::AssetSeries;
use crate::config::MetricsConfig;
use crate::risk_free::RiskFree;

/// The fixed set of metrics computed by a metrics collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Annualized standard deviation of returns.
    Volatility,
    /// Annualized mean excess return per unit of volatility.
    SharpeRatio,
    /// Annualized mean excess return per unit of downside deviation.
    SortinoRatio,
    /// Deepest fall from a running peak.
    MaxDrawdown,
    /// Historical Value at Risk.
    ValueAtRisk,
    /// Historical expected shortfall.
    ConditionalValueAtRisk,
    /// Annualized standard deviation of losses.
    SemiDeviation,
    /// Root-mean-square drawdown.
    UlcerIndex,
    /// Mean absolute deviation from the mean return.
    MeanAbsoluteDeviation,
}

impl MetricKind {
    /// Every metric, in reporting order.
    pub const ALL: [MetricKind; 9] = [
        Self::Volatility,
        Self::SharpeRatio,
        Self::SortinoRatio,
        Self::MaxDrawdown,
        Self::ValueAtRisk,
        Self::ConditionalValueAtRisk,
        Self::SemiDeviation,
        Self::UlcerIndex,
        Self::MeanAbsoluteDeviation,
    ];

    /// Row identifier used in reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Volatility => "Volatility",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::SortinoRatio => "Sortino Ratio",
            Self::MaxDrawdown => "Max Drawdown",
            Self::ValueAtRisk => "VaR",
            Self::ConditionalValueAtRisk => "CVaR",
            Self::SemiDeviation => "Semi-deviation",
            Self::UlcerIndex => "Ulcer Index",
            Self::MeanAbsoluteDeviation => "Mean Absolute Deviation",
        }
    }

    /// Returns true if the metric subtracts the risk-free rate.
    #[must_use]
    pub fn uses_risk_free(&self) -> bool {
        matches!(self, Self::SharpeRatio | Self::SortinoRatio)
    }

    /// Runs this metric's calculator.
    pub fn compute<S: AssetSeries>(
        self,
        returns: &S,
        risk_free: &RiskFree,
        config: &MetricsConfig,
    ) -> S::Values {
        match self {
            Self::Volatility => volatility(returns, config),
            Self::SharpeRatio => sharpe_ratio(returns, risk_free, config),
            Self::SortinoRatio => sortino_ratio(returns, risk_free, config),
            Self::MaxDrawdown => max_drawdown(returns, config),
            Self::ValueAtRisk => value_at_risk(returns, config),
            Self::ConditionalValueAtRisk => conditional_value_at_risk(returns, config),
            Self::SemiDeviation => semi_deviation(returns, config),
            Self::UlcerIndex => ulcer_index(returns, config),
            Self::MeanAbsoluteDeviation => mean_absolute_deviation(returns, config),
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigma_core::{Date, ReturnTable};

    #[test]
    fn test_reporting_order() {
        let labels: Vec<&str> = MetricKind::ALL.iter().map(MetricKind::label).collect();
        assert_eq!(
            labels,
            vec![
                "Volatility",
                "Sharpe Ratio",
                "Sortino Ratio",
                "Max Drawdown",
                "VaR",
                "CVaR",
                "Semi-deviation",
                "Ulcer Index",
                "Mean Absolute Deviation",
            ]
        );
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(MetricKind::ConditionalValueAtRisk.to_string(), "CVaR");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MetricKind::SharpeRatio).unwrap();
        assert_eq!(json, "\"sharpe_ratio\"");
        let back: MetricKind = serde_json::from_str("\"ulcer_index\"").unwrap();
        assert_eq!(back, MetricKind::UlcerIndex);
    }

    #[test]
    fn test_risk_free_only_enters_ratios() {
        let uses: Vec<MetricKind> = MetricKind::ALL
            .into_iter()
            .filter(MetricKind::uses_risk_free)
            .collect();
        assert_eq!(uses, vec![MetricKind::SharpeRatio, MetricKind::SortinoRatio]);
    }

    #[test]
    fn test_columns_are_independent() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let dates: Vec<Date> = (0..4).map(|i| start.add_days(i)).collect();
        let a = vec![0.01, -0.02, 0.03, -0.01];
        let table = ReturnTable::new(
            dates.clone(),
            vec![
                ("A".to_string(), a.clone()),
                ("B".to_string(), vec![0.05, 0.05, 0.05, 0.05]),
            ],
        )
        .unwrap();
        let alone = ReturnTable::new(dates, vec![("A".to_string(), a)]).unwrap();
        let config = MetricsConfig::default();

        for metric in MetricKind::ALL {
            let together = metric.compute(&table, &RiskFree::Annual(0.02), &config);
            let single = metric.compute(&alone, &RiskFree::Annual(0.02), &config);
            let (x, y) = (together.get("A").unwrap(), single.get("A").unwrap());
            assert!(x == y || (x.is_nan() && y.is_nan()), "{metric}: {x} vs {y}");
        }
    }
}
