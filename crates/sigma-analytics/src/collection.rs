//! Metrics collection: every calculator over every asset.
//!
//! A [`MetricsCollection`] runs the fixed metric set over a price table and
//! keeps the resulting [`MetricsTable`] (metric rows by asset columns) for
//! the rest of the analysis session.

use serde::{Deserialize, Serialize};
use sigma_core::{PriceTable, SigmaError, SigmaResult};
use tracing::debug;

use crate::asset_series::AssetValues;
use crate::config::MetricsConfig;
use crate::metrics::MetricKind;
use crate::returns::returns;
use crate::risk_free::RiskFree;

/// One metric evaluated for every asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// The metric.
    pub metric: MetricKind,
    /// One value per asset, in the table's asset order.
    pub values: AssetValues,
}

/// Metric by asset results of one analysis run.
///
/// Rows follow [`MetricKind::ALL`]; undefined values are kept as `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    assets: Vec<String>,
    rows: Vec<MetricRow>,
    periods_per_year: f64,
    confidence: f64,
}

impl MetricsTable {
    /// Asset identifiers, in column order.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Metric rows, in reporting order.
    #[must_use]
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Values of one metric across assets.
    #[must_use]
    pub fn row(&self, metric: MetricKind) -> Option<&AssetValues> {
        self.rows
            .iter()
            .find(|r| r.metric == metric)
            .map(|r| &r.values)
    }

    /// Values of every metric for one asset, in reporting order.
    #[must_use]
    pub fn column(&self, asset: &str) -> Option<Vec<(MetricKind, f64)>> {
        if !self.assets.iter().any(|a| a == asset) {
            return None;
        }
        self.rows
            .iter()
            .map(|r| r.values.get(asset).map(|v| (r.metric, v)))
            .collect()
    }

    /// A single cell.
    #[must_use]
    pub fn get(&self, metric: MetricKind, asset: &str) -> Option<f64> {
        self.row(metric)?.get(asset)
    }

    /// Annualization factor the table was computed with.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        self.periods_per_year
    }

    /// Confidence level of the VaR and CVaR rows.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Latest value of every metric for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Asset identifier.
    pub asset: String,
    /// Metric values in reporting order.
    pub values: Vec<(MetricKind, f64)>,
}

impl SummaryRow {
    /// Value of one metric.
    #[must_use]
    pub fn get(&self, metric: MetricKind) -> Option<f64> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }
}

/// Runs the metric calculators and holds the last result.
///
/// # Example
///
/// ```rust
/// use sigma_analytics::{MetricKind, MetricsCollection, MetricsConfig, RiskFree};
/// use sigma_core::{Date, PriceTable};
///
/// let d0 = Date::from_ymd(2025, 1, 2).unwrap();
/// let dates = (0..3).map(|i| d0.add_days(i)).collect();
/// let prices = PriceTable::new(dates, vec![("A".to_string(), vec![100.0, 110.0, 99.0])]).unwrap();
///
/// let mut collection = MetricsCollection::new(MetricsConfig::default()).unwrap();
/// let table = collection.compute_all(&prices, &RiskFree::default()).unwrap();
/// let mdd = table.get(MetricKind::MaxDrawdown, "A").unwrap();
/// assert!((mdd + 0.10).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollection {
    config: MetricsConfig,
    table: Option<MetricsTable>,
}

impl MetricsCollection {
    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if the configuration is invalid.
    pub fn new(config: MetricsConfig) -> SigmaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            table: None,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Computes every metric for every asset of `prices`.
    ///
    /// Returns are derived once here and handed to each calculator; any
    /// previous result is replaced.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if an asset has fewer than two
    /// prices.
    pub fn compute_all(
        &mut self,
        prices: &PriceTable,
        risk_free: &RiskFree,
    ) -> SigmaResult<&MetricsTable> {
        let period_returns = returns(prices)?;
        debug!(
            assets = period_returns.n_assets(),
            observations = period_returns.n_rows(),
            "computing risk metrics"
        );

        let rows = MetricKind::ALL
            .into_iter()
            .map(|metric| {
                debug!(metric = metric.label(), "computing metric");
                MetricRow {
                    metric,
                    values: metric.compute(&period_returns, risk_free, &self.config),
                }
            })
            .collect();

        let table = MetricsTable {
            assets: period_returns.assets().to_vec(),
            rows,
            periods_per_year: self.config.periods_per_year,
            confidence: self.config.confidence,
        };
        Ok(&*self.table.insert(table))
    }

    /// The last computed table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&MetricsTable> {
        self.table.as_ref()
    }

    /// Latest value of every metric, one row per asset.
    ///
    /// Metrics are computed over the whole sample, so the latest value is
    /// the only value.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::NotComputed` if [`compute_all`](Self::compute_all)
    /// has not run.
    pub fn latest(&self) -> SigmaResult<Vec<SummaryRow>> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| SigmaError::not_computed("latest"))?;

        Ok(table
            .assets
            .iter()
            .map(|asset| SummaryRow {
                asset: asset.clone(),
                values: table
                    .rows
                    .iter()
                    .map(|r| (r.metric, r.values.get(asset).unwrap_or(f64::NAN)))
                    .collect(),
            })
            .collect())
    }
}
