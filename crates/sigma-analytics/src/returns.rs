//! Price to return transformation.
//!
//! Simple period-over-period returns:
//!
//! ```text
//! r[t] = (p[t] - p[t-1]) / p[t-1]
//! ```
//!
//! The first observation has no predecessor and is dropped, so a return
//! series has one fewer row than its price series and starts on the second
//! price date. Nothing is cached: every call recomputes from the prices.

use serde::{Deserialize, Serialize};
use sigma_core::{PriceTable, ReturnTable, SigmaError, SigmaResult, TimeSeries};
use sigma_math::statistics::correlation;

/// Price data that can be turned into returns.
pub trait PriceInput {
    /// The return data produced: a series for a series, a table for a table.
    type Returns;

    /// Computes simple returns, dropping the first row.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if fewer than 2 prices are
    /// supplied for an asset, or a price is not strictly positive.
    fn to_returns(&self) -> SigmaResult<Self::Returns>;
}

impl PriceInput for TimeSeries {
    type Returns = TimeSeries;

    fn to_returns(&self) -> SigmaResult<TimeSeries> {
        check_prices("series", self.values())?;
        TimeSeries::new(self.dates()[1..].to_vec(), simple_returns(self.values()))
    }
}

impl PriceInput for PriceTable {
    type Returns = ReturnTable;

    fn to_returns(&self) -> SigmaResult<ReturnTable> {
        let mut columns = Vec::with_capacity(self.n_assets());
        for (asset, prices) in self.columns() {
            check_prices(asset, prices)?;
            columns.push((asset.to_string(), simple_returns(prices)));
        }
        ReturnTable::new(self.dates()[1..].to_vec(), columns)
    }
}

/// Computes simple returns for a price series or a multi-asset price table.
///
/// # Errors
///
/// Returns `SigmaError::InvalidInput` if any asset has fewer than 2 prices.
///
/// # Example
///
/// ```rust
/// use sigma_analytics::returns;
/// use sigma_core::{Date, TimeSeries};
///
/// let d0 = Date::from_ymd(2025, 1, 2).unwrap();
/// let prices = TimeSeries::new(
///     vec![d0, d0.add_days(1), d0.add_days(2)],
///     vec![100.0, 110.0, 99.0],
/// )
/// .unwrap();
///
/// let r = returns(&prices).unwrap();
/// assert_eq!(r.len(), 2);
/// assert!((r.values()[0] - 0.10).abs() < 1e-12);
/// assert!((r.values()[1] + 0.10).abs() < 1e-12);
/// ```
pub fn returns<P: PriceInput>(prices: &P) -> SigmaResult<P::Returns> {
    prices.to_returns()
}

fn check_prices(asset: &str, prices: &[f64]) -> SigmaResult<()> {
    if prices.len() < 2 {
        return Err(SigmaError::insufficient_data(asset, 2, prices.len()));
    }
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(SigmaError::invalid_input(format!(
            "'{asset}' has a non-positive price: {bad}"
        )));
    }
    Ok(())
}

fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Pairwise Pearson correlation of asset return columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Asset identifiers, in the order of rows and columns.
    pub assets: Vec<String>,
    /// Row-major correlation coefficients; the diagonal is 1 unless the
    /// asset's returns are constant, in which case its row is `NaN`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Returns the correlation between two assets.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.assets.iter().position(|x| x == a)?;
        let j = self.assets.iter().position(|x| x == b)?;
        Some(self.values[i][j])
    }
}

/// Computes the correlation matrix of a return table.
#[must_use]
pub fn correlation_matrix(returns: &ReturnTable) -> CorrelationMatrix {
    let columns: Vec<&[f64]> = returns.columns().map(|(_, c)| c).collect();
    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| correlation(a, b)).collect())
        .collect();
    CorrelationMatrix {
        assets: returns.assets().to_vec(),
        values,
    }
}
