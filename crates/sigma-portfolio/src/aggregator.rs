//! Portfolio aggregation and strategy comparison.
//!
//! The portfolio return on each date is the weighted sum of asset returns:
//!
//! ```text
//! r_p[t] = Σ w_i × r_i[t]
//! ```
//!
//! Weighted assets missing from the price table are ignored; priced assets
//! without a weight contribute nothing.

use serde::{Deserialize, Serialize};
use sigma_analytics::parallel::maybe_parallel_map;
use sigma_analytics::{returns, MetricsConfig};
use sigma_core::{PriceTable, TimeSeries};
use sigma_math::quantile;
use sigma_math::statistics::{is_constant, kurtosis, mean, skewness, std_dev};
use tracing::debug;

use crate::error::{PortfolioError, PortfolioResult};
use crate::weights::WeightVector;

/// Statistics of one portfolio return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStatistics {
    /// Compounded return over the sample: `Π(1 + r) - 1`.
    pub total_return: f64,
    /// Arithmetic mean return times periods per year.
    pub annualized_return: f64,
    /// Sample standard deviation times √periods per year.
    pub annualized_volatility: f64,
    /// Annualized return over annualized volatility, zero risk-free rate.
    pub sharpe_ratio: f64,
    /// Deepest fall of the compounded value from a running peak.
    pub max_drawdown: f64,
    /// Bias-corrected sample skewness.
    pub skewness: f64,
    /// Bias-corrected excess kurtosis.
    pub kurtosis: f64,
    /// Historical VaR at `confidence`.
    pub var: f64,
    /// Historical CVaR at `confidence`.
    pub cvar: f64,
    /// Confidence level of `var` and `cvar`.
    pub confidence: f64,
}

impl PortfolioStatistics {
    fn from_returns(r: &[f64], config: &MetricsConfig) -> Self {
        let ppy = config.periods_per_year;
        let annualized_return = mean(r) * ppy;
        let annualized_volatility = if is_constant(r) && r.len() > 1 {
            0.0
        } else {
            std_dev(r) * ppy.sqrt()
        };
        let sharpe_ratio = if annualized_volatility.is_finite() && annualized_volatility > 1e-12 {
            annualized_return / annualized_volatility
        } else {
            f64::NAN
        };

        let var = quantile(r, 1.0 - config.confidence).unwrap_or(f64::NAN);
        let tail: Vec<f64> = r.iter().copied().filter(|x| *x <= var).collect();

        Self {
            total_return: r.iter().map(|x| 1.0 + x).product::<f64>() - 1.0,
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown: max_drawdown(r),
            skewness: skewness(r),
            kurtosis: kurtosis(r),
            var,
            cvar: mean(&tail),
            confidence: config.confidence,
        }
    }

    /// Statistics as `(label, value)` pairs in reporting order.
    ///
    /// Labels: Total Return, Annualized Return, Annualized Volatility,
    /// Sharpe Ratio, Max Drawdown, Skewness, Kurtosis, VaR (95%), CVaR (95%),
    /// with the percentage following `confidence`.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, f64)> {
        let level = percent_label(self.confidence);
        vec![
            ("Total Return".to_string(), self.total_return),
            ("Annualized Return".to_string(), self.annualized_return),
            ("Annualized Volatility".to_string(), self.annualized_volatility),
            ("Sharpe Ratio".to_string(), self.sharpe_ratio),
            ("Max Drawdown".to_string(), self.max_drawdown),
            ("Skewness".to_string(), self.skewness),
            ("Kurtosis".to_string(), self.kurtosis),
            (format!("VaR ({level})"), self.var),
            (format!("CVaR ({level})"), self.cvar),
        ]
    }
}

fn percent_label(confidence: f64) -> String {
    let pct = confidence * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{pct:.0}%")
    } else {
        format!("{pct:.1}%")
    }
}

/// Peak-to-trough decline of the compounded value, starting from 1.
fn max_drawdown(r: &[f64]) -> f64 {
    let mut value = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = f64::NAN;
    for x in r {
        value *= 1.0 + x;
        peak = peak.max(value);
        worst = worst.min((value - peak) / peak);
    }
    worst
}

/// Statistics of one named strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRow {
    /// Strategy name.
    pub name: String,
    /// Statistics of the strategy's portfolio.
    pub statistics: PortfolioStatistics,
}

/// Strategy by statistic comparison, one row per strategy in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Rows in the order strategies were supplied.
    pub rows: Vec<StrategyRow>,
}

impl ComparisonTable {
    /// Statistics of the named strategy.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PortfolioStatistics> {
        self.rows
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.statistics)
    }

    /// Strategy names, in row order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.name.as_str())
    }

    /// Number of strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no strategy was compared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Weighted portfolio over a borrowed price table.
///
/// # Example
///
/// ```rust
/// use sigma_core::{Date, PriceTable};
/// use sigma_portfolio::{PortfolioAggregator, WeightVector};
///
/// let d0 = Date::from_ymd(2025, 1, 2).unwrap();
/// let dates = (0..3).map(|i| d0.add_days(i)).collect();
/// let prices = PriceTable::new(
///     dates,
///     vec![
///         ("A".to_string(), vec![100.0, 110.0, 121.0]),
///         ("B".to_string(), vec![100.0, 90.0, 81.0]),
///     ],
/// )
/// .unwrap();
///
/// let weights = WeightVector::new([("A", 0.5), ("B", 0.5)]).unwrap();
/// let portfolio = PortfolioAggregator::new(&prices, Some(weights)).unwrap();
/// let r = portfolio.portfolio_returns().unwrap();
/// assert!(r.values().iter().all(|x| x.abs() < 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioAggregator<'a> {
    prices: &'a PriceTable,
    weights: WeightVector,
    config: MetricsConfig,
}

impl<'a> PortfolioAggregator<'a> {
    /// Creates an aggregator; without weights every asset gets an equal share.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::EmptyPortfolio` if the table has no assets
    /// and no weights are given.
    pub fn new(prices: &'a PriceTable, weights: Option<WeightVector>) -> PortfolioResult<Self> {
        let weights = match weights {
            Some(w) => w,
            None => WeightVector::equal(prices.assets())?,
        };
        Ok(Self {
            prices,
            weights,
            config: MetricsConfig::default(),
        })
    }

    /// Sets the annualization and confidence settings.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Sigma` if the configuration is invalid.
    pub fn with_config(mut self, config: MetricsConfig) -> PortfolioResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// The weights in use.
    #[must_use]
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Weighted sum of asset returns on every return date.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::Sigma` if an asset has fewer than two prices
    /// - `PortfolioError::EmptyPortfolio` if no weighted asset is priced
    pub fn portfolio_returns(&self) -> PortfolioResult<TimeSeries> {
        let asset_returns = returns(self.prices)?;
        let mut combined = vec![0.0; asset_returns.n_rows()];
        let mut matched = 0;

        for (asset, weight) in self.weights.iter() {
            let Some(column) = asset_returns.column(asset) else {
                debug!(asset, "weighted asset has no prices, ignoring");
                continue;
            };
            for (acc, r) in combined.iter_mut().zip(column) {
                *acc += weight * r;
            }
            matched += 1;
        }

        if matched == 0 {
            return Err(PortfolioError::EmptyPortfolio);
        }
        Ok(TimeSeries::new(asset_returns.dates().to_vec(), combined)?)
    }

    /// Portfolio value path: `initial × Π(1 + r)` on every return date.
    ///
    /// # Errors
    ///
    /// Fails as [`portfolio_returns`](Self::portfolio_returns) does, or with
    /// `PortfolioError::Sigma` if `initial` is not finite.
    pub fn portfolio_value(&self, initial: f64) -> PortfolioResult<TimeSeries> {
        if !initial.is_finite() {
            return Err(PortfolioError::invalid_input(format!(
                "initial value must be finite, got {initial}"
            )));
        }
        let r = self.portfolio_returns()?;
        let path = r
            .values()
            .iter()
            .scan(initial, |value, x| {
                *value *= 1.0 + x;
                Some(*value)
            })
            .collect();
        Ok(TimeSeries::new(r.dates().to_vec(), path)?)
    }

    /// Statistics of the portfolio return series.
    ///
    /// # Errors
    ///
    /// Fails as [`portfolio_returns`](Self::portfolio_returns) does.
    pub fn statistics(&self) -> PortfolioResult<PortfolioStatistics> {
        let r = self.portfolio_returns()?;
        debug!(observations = r.len(), "computing portfolio statistics");
        Ok(PortfolioStatistics::from_returns(r.values(), &self.config))
    }

    /// Statistics of each strategy over the same prices and configuration.
    ///
    /// # Errors
    ///
    /// Returns the first strategy's error, in input order.
    pub fn compare(&self, strategies: &[(String, WeightVector)]) -> PortfolioResult<ComparisonTable> {
        debug!(strategies = strategies.len(), "comparing strategies");
        let results = maybe_parallel_map(strategies, &self.config, |(name, weights)| {
            let aggregator = PortfolioAggregator {
                prices: self.prices,
                weights: weights.clone(),
                config: self.config.clone(),
            };
            aggregator.statistics().map(|statistics| StrategyRow {
                name: name.clone(),
                statistics,
            })
        });
        let rows = results.into_iter().collect::<PortfolioResult<Vec<_>>>()?;
        Ok(ComparisonTable { rows })
    }
}

/// Reference strategies over `assets`.
///
/// Always includes "Equal Weight". With five or more assets, also
/// "Conservative", "Aggressive" and "Defensive", which weight the first
/// five assets as two growth names, two financials and one staple.
///
/// # Errors
///
/// Returns `PortfolioError::EmptyPortfolio` if `assets` is empty.
pub fn sample_strategies<S: AsRef<str>>(assets: &[S]) -> PortfolioResult<Vec<(String, WeightVector)>> {
    let mut strategies = vec![("Equal Weight".to_string(), WeightVector::equal(assets)?)];
    if assets.len() < 5 {
        return Ok(strategies);
    }

    let tilted = [
        ("Conservative", [0.15, 0.15, 0.30, 0.30, 0.10]),
        ("Aggressive", [0.35, 0.35, 0.10, 0.10, 0.10]),
        ("Defensive", [0.10, 0.10, 0.25, 0.25, 0.30]),
    ];
    for (name, split) in tilted {
        let weights = WeightVector::new(
            assets
                .iter()
                .zip(split)
                .map(|(a, w)| (a.as_ref().to_string(), w)),
        )?;
        strategies.push((name.to_string(), weights));
    }
    Ok(strategies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sigma_core::Date;

    fn dates(n: usize) -> Vec<Date> {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        (0..n as i64).map(|i| start.add_days(i)).collect()
    }

    fn prices() -> PriceTable {
        PriceTable::new(
            dates(4),
            vec![
                ("A".to_string(), vec![100.0, 110.0, 99.0, 108.9]),
                ("B".to_string(), vec![50.0, 50.0, 55.0, 55.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_is_equal_weight() {
        let prices = prices();
        let p = PortfolioAggregator::new(&prices, None).unwrap();
        assert_eq!(p.weights().get("A"), Some(0.5));
        assert_eq!(p.weights().get("B"), Some(0.5));
    }

    #[test]
    fn test_drawdown_measured_from_opening_value() {
        let falling = PriceTable::new(
            dates(3),
            vec![("A".to_string(), vec![100.0, 90.0, 95.0])],
        )
        .unwrap();
        let stats = PortfolioAggregator::new(&falling, None)
            .unwrap()
            .statistics()
            .unwrap();
        assert_relative_eq!(stats.max_drawdown, -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialized_weights_are_normalized() {
        let flat = PriceTable::new(
            dates(2),
            vec![
                ("A".to_string(), vec![100.0, 110.0]),
                ("B".to_string(), vec![100.0, 110.0]),
            ],
        )
        .unwrap();
        let json = r#"{"weights": [["A", 2.0], ["B", 2.0]], "normalization": null}"#;
        let weights: WeightVector = serde_json::from_str(json).unwrap();
        let r = PortfolioAggregator::new(&flat, Some(weights))
            .unwrap()
            .portfolio_returns()
            .unwrap();
        assert_relative_eq!(r.values()[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_portfolio_returns() {
        let prices = prices();
        let w = WeightVector::new([("A", 0.75), ("B", 0.25)]).unwrap();
        let r = PortfolioAggregator::new(&prices, Some(w))
            .unwrap()
            .portfolio_returns()
            .unwrap();

        // A: 0.1, -0.1, 0.1   B: 0, 0.1, 0
        assert_eq!(r.len(), 3);
        assert_eq!(r.dates(), &prices.dates()[1..]);
        assert_relative_eq!(r.values()[0], 0.075, epsilon = 1e-12);
        assert_relative_eq!(r.values()[1], -0.05, epsilon = 1e-12);
        assert_relative_eq!(r.values()[2], 0.075, epsilon = 1e-12);
    }

    #[test]
    fn test_unpriced_weights_ignored_and_unweighted_assets_excluded() {
        let prices = prices();
        let w = WeightVector::new([("A", 0.5), ("GHOST", 0.5)]).unwrap();
        let r = PortfolioAggregator::new(&prices, Some(w))
            .unwrap()
            .portfolio_returns()
            .unwrap();
        assert_relative_eq!(r.values()[0], 0.05, epsilon = 1e-12);
        assert_relative_eq!(r.values()[1], -0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_no_priced_weight_is_empty_portfolio() {
        let prices = prices();
        let w = WeightVector::new([("GHOST", 1.0)]).unwrap();
        let err = PortfolioAggregator::new(&prices, Some(w))
            .unwrap()
            .statistics()
            .unwrap_err();
        assert_eq!(err, PortfolioError::EmptyPortfolio);
    }

    #[test]
    fn test_portfolio_value() {
        let prices = prices();
        let w = WeightVector::new([("A", 1.0)]).unwrap();
        let p = PortfolioAggregator::new(&prices, Some(w)).unwrap();
        let value = p.portfolio_value(100_000.0).unwrap();

        assert_relative_eq!(value.values()[0], 110_000.0, epsilon = 1e-6);
        assert_relative_eq!(value.values()[1], 99_000.0, epsilon = 1e-6);
        assert_relative_eq!(value.values()[2], 108_900.0, epsilon = 1e-6);
        assert!(p.portfolio_value(f64::NAN).is_err());
    }

    #[test]
    fn test_statistics() {
        let prices = prices();
        let w = WeightVector::new([("A", 1.0)]).unwrap();
        let stats = PortfolioAggregator::new(&prices, Some(w))
            .unwrap()
            .statistics()
            .unwrap();

        // returns 0.1, -0.1, 0.1
        let mean = 0.1 / 3.0;
        let std = (2.0_f64 * 0.04 / 9.0 + 0.16 / 9.0).sqrt() / 2.0_f64.sqrt();
        assert_relative_eq!(stats.total_return, 0.089, epsilon = 1e-12);
        assert_relative_eq!(stats.annualized_return, mean * 252.0, epsilon = 1e-12);
        assert_relative_eq!(stats.annualized_volatility, std * 252.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            stats.sharpe_ratio,
            stats.annualized_return / stats.annualized_volatility,
            epsilon = 1e-12
        );
        assert_relative_eq!(stats.max_drawdown, -0.1, epsilon = 1e-12);
        assert!(stats.skewness < 0.0);
        assert!(stats.kurtosis.is_nan());
        // rank 0.1 between -0.1 and 0.1
        assert_relative_eq!(stats.var, -0.1 + 0.1 * 0.2, epsilon = 1e-12);
        assert_relative_eq!(stats.cvar, -0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_portfolio_sharpe_is_nan() {
        let flat = PriceTable::new(dates(4), vec![("F".to_string(), vec![10.0; 4])]).unwrap();
        let stats = PortfolioAggregator::new(&flat, None)
            .unwrap()
            .statistics()
            .unwrap();
        assert_eq!(stats.annualized_volatility, 0.0);
        assert!(stats.sharpe_ratio.is_nan());
        assert_eq!(stats.max_drawdown, 0.0);
        assert_eq!(stats.var, 0.0);
        assert_eq!(stats.cvar, 0.0);
    }

    #[test]
    fn test_entries_labels() {
        let prices = prices();
        let stats = PortfolioAggregator::new(&prices, None)
            .unwrap()
            .statistics()
            .unwrap();
        let labels: Vec<String> = stats.entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels[0], "Total Return");
        assert_eq!(labels[7], "VaR (95%)");
        assert_eq!(labels[8], "CVaR (95%)");
        assert_eq!(percent_label(0.975), "97.5%");
    }

    #[test]
    fn test_config_changes_annualization() {
        let prices = prices();
        let daily = PortfolioAggregator::new(&prices, None)
            .unwrap()
            .statistics()
            .unwrap();
        let weekly = PortfolioAggregator::new(&prices, None)
            .unwrap()
            .with_config(MetricsConfig::default().with_periods_per_year(52.0))
            .unwrap()
            .statistics()
            .unwrap();
        assert_relative_eq!(
            weekly.annualized_return / daily.annualized_return,
            52.0 / 252.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_compare_keeps_order() {
        let prices = prices();
        let p = PortfolioAggregator::new(&prices, None).unwrap();
        let strategies = vec![
            ("All A".to_string(), WeightVector::new([("A", 1.0)]).unwrap()),
            ("All B".to_string(), WeightVector::new([("B", 1.0)]).unwrap()),
        ];
        let table = p.compare(&strategies).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["All A", "All B"]);
        let b = table.get("All B").unwrap();
        assert_relative_eq!(b.total_return, 0.1, epsilon = 1e-12);
        assert_eq!(b.max_drawdown, 0.0);
    }

    #[test]
    fn test_compare_propagates_errors() {
        let prices = prices();
        let p = PortfolioAggregator::new(&prices, None).unwrap();
        let strategies = vec![("Ghost".to_string(), WeightVector::new([("Z", 1.0)]).unwrap())];
        assert_eq!(p.compare(&strategies).unwrap_err(), PortfolioError::EmptyPortfolio);
    }

    #[test]
    fn test_sample_strategies() {
        let five = ["PETR4", "VALE3", "ITUB4", "BBDC4", "ABEV3"];
        let strategies = sample_strategies(&five).unwrap();
        let names: Vec<&str> = strategies.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Equal Weight", "Conservative", "Aggressive", "Defensive"]);

        let defensive = &strategies[3].1;
        assert_eq!(defensive.get("ABEV3"), Some(0.30));
        assert!(defensive.normalization().is_none());

        let few = sample_strategies(&["A", "B"]).unwrap();
        assert_eq!(few.len(), 1);
        assert_eq!(few[0].1.get("B"), Some(0.5));
    }
}
