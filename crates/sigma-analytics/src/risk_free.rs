//! Risk-free rate alignment.
//!
//! A risk-free input is either one annualized rate, spread evenly over
//! every period, or a dated series of per-period rates. Aligning it with a
//! return series yields the excess returns that enter ratio numerators and
//! the effective returns (the raw returns over the same rows) that
//! dispersion and downside filters use.

use serde::{Deserialize, Serialize};
use sigma_core::types::Date;
use sigma_core::{SigmaError, SigmaResult, TimeSeries};
use tracing::debug;

use crate::asset_series::AssetSeries;

/// Risk-free rate input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskFree {
    /// Annualized rate, e.g. `0.1075` for 10.75% a year.
    Annual(f64),
    /// Dated per-period rates, e.g. daily rates of an overnight index.
    Series(TimeSeries),
}

impl Default for RiskFree {
    fn default() -> Self {
        Self::Annual(0.0)
    }
}

impl From<f64> for RiskFree {
    fn from(rate: f64) -> Self {
        Self::Annual(rate)
    }
}

impl From<TimeSeries> for RiskFree {
    fn from(rates: TimeSeries) -> Self {
        Self::Series(rates)
    }
}

impl RiskFree {
    /// Builds a dated per-period rate series from daily compounding factors.
    ///
    /// A factor of `1.00045` is a daily rate of `0.00045`.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if a factor is not a positive
    /// finite number.
    pub fn from_daily_factors(factors: &TimeSeries) -> SigmaResult<Self> {
        if let Some((date, bad)) = factors.iter().find(|(_, f)| !(f.is_finite() && *f > 0.0)) {
            return Err(SigmaError::invalid_input(format!(
                "invalid daily factor on {date}: {bad}"
            )));
        }
        Ok(Self::Series(factors.map_rows(|_, f| f - 1.0)))
    }
}

/// Annual rate implied by compounding one daily factor over a year.
///
/// ```text
/// annual = factor^periods_per_year - 1
/// ```
#[must_use]
pub fn annualized_rate_from_factor(factor: f64, periods_per_year: f64) -> f64 {
    factor.powf(periods_per_year) - 1.0
}

/// Returns restricted to the rows usable against a risk-free input.
#[derive(Debug, Clone)]
pub struct Aligned<S> {
    /// Returns minus the per-period risk-free rate.
    pub excess: S,
    /// Raw returns over the same rows as `excess`.
    pub effective: S,
}

/// Aligns returns with a risk-free input.
///
/// - `Annual(rate)`: every row, every asset, minus `rate / periods_per_year`.
/// - `Series(rates)`: only dates present in both the returns and the rates
///   are kept; the rate of each kept date is subtracted from every asset.
///   Rows missing on either side are dropped without error. An empty
///   intersection gives empty series, and every metric on them is `NaN`.
pub fn align<S: AssetSeries>(returns: &S, risk_free: &RiskFree, periods_per_year: f64) -> Aligned<S> {
    match risk_free {
        RiskFree::Annual(rate) => {
            let per_period = rate / periods_per_year;
            Aligned {
                excess: returns.map_rows(|_, r| r - per_period),
                effective: returns.clone(),
            }
        }
        RiskFree::Series(rates) => {
            let (rows, rate_values) = intersect(returns.dates(), rates);
            if rows.len() < returns.dates().len() {
                debug!(
                    kept = rows.len(),
                    dropped = returns.dates().len() - rows.len(),
                    "risk-free series does not cover every return date"
                );
            }
            let effective = returns.take_rows(&rows);
            let excess = effective.map_rows(|i, r| r - rate_values[i]);
            Aligned { excess, effective }
        }
    }
}

/// Row positions in `dates` that also appear in `rates`, with those rates.
fn intersect(dates: &[Date], rates: &TimeSeries) -> (Vec<usize>, Vec<f64>) {
    let rate_dates = rates.dates();
    let rate_values = rates.values();
    let mut rows = Vec::new();
    let mut matched = Vec::new();
    let (mut i, mut j) = (0, 0);

    // both indices are strictly increasing
    while i < dates.len() && j < rate_dates.len() {
        match dates[i].cmp(&rate_dates[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                rows.push(i);
                matched.push(rate_values[j]);
                i += 1;
                j += 1;
            }
        }
    }
    (rows, matched)
}
