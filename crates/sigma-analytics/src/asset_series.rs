//! One or many named return series behind a single interface.
//!
//! Every calculator is written once against [`AssetSeries`]. A single
//! [`TimeSeries`] yields a scalar, a [`ReturnTable`] yields one value per
//! asset column, each computed from that column alone.

use serde::{Deserialize, Serialize};
use sigma_core::types::Date;
use sigma_core::{ReturnTable, TimeSeries};

use crate::config::MetricsConfig;
use crate::parallel::maybe_parallel_map;

/// Return data over one or many assets sharing a date index.
pub trait AssetSeries: Clone + Sync {
    /// What a calculator produces: `f64` for one asset, [`AssetValues`] for many.
    type Values: Clone + std::fmt::Debug;

    /// The shared date index.
    fn dates(&self) -> &[Date];

    /// Evaluates `f` on every asset's values independently.
    fn map_assets<F>(&self, config: &MetricsConfig, f: F) -> Self::Values
    where
        F: Fn(&[f64]) -> f64 + Sync + Send;

    /// Evaluates `f` on the matching columns of `self` and `other`.
    ///
    /// Both must hold the same assets in the same order, as the excess and
    /// effective returns produced by risk-free alignment do.
    fn zip_assets<F>(&self, other: &Self, config: &MetricsConfig, f: F) -> Self::Values
    where
        F: Fn(&[f64], &[f64]) -> f64 + Sync + Send;

    /// Keeps only the rows at the given (ascending) positions.
    #[must_use]
    fn take_rows(&self, rows: &[usize]) -> Self;

    /// Applies `f(row, value)` to every value.
    #[must_use]
    fn map_rows<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64;
}

impl AssetSeries for TimeSeries {
    type Values = f64;

    fn dates(&self) -> &[Date] {
        TimeSeries::dates(self)
    }

    fn map_assets<F>(&self, _config: &MetricsConfig, f: F) -> f64
    where
        F: Fn(&[f64]) -> f64 + Sync + Send,
    {
        f(self.values())
    }

    fn zip_assets<F>(&self, other: &Self, _config: &MetricsConfig, f: F) -> f64
    where
        F: Fn(&[f64], &[f64]) -> f64 + Sync + Send,
    {
        f(self.values(), other.values())
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        TimeSeries::take_rows(self, rows)
    }

    fn map_rows<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64,
    {
        TimeSeries::map_rows(self, f)
    }
}

impl AssetSeries for ReturnTable {
    type Values = AssetValues;

    fn dates(&self) -> &[Date] {
        ReturnTable::dates(self)
    }

    fn map_assets<F>(&self, config: &MetricsConfig, f: F) -> AssetValues
    where
        F: Fn(&[f64]) -> f64 + Sync + Send,
    {
        let columns: Vec<(&str, &[f64])> = self.columns().collect();
        maybe_parallel_map(&columns, config, |(asset, values)| {
            ((*asset).to_string(), f(values))
        })
        .into_iter()
        .collect()
    }

    fn zip_assets<F>(&self, other: &Self, config: &MetricsConfig, f: F) -> AssetValues
    where
        F: Fn(&[f64], &[f64]) -> f64 + Sync + Send,
    {
        let pairs: Vec<(&str, &[f64], &[f64])> = self
            .columns()
            .zip(other.columns())
            .map(|((asset, a), (_, b))| (asset, a, b))
            .collect();
        maybe_parallel_map(&pairs, config, |(asset, a, b)| {
            ((*asset).to_string(), f(a, b))
        })
        .into_iter()
        .collect()
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        ReturnTable::take_rows(self, rows)
    }

    fn map_rows<F>(&self, f: F) -> Self
    where
        F: Fn(usize, f64) -> f64,
    {
        ReturnTable::map_rows(self, f)
    }
}

/// One metric value per asset, in the table's column order.
///
/// Values may be `NaN` where the metric is undefined for that asset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetValues {
    entries: Vec<(String, f64)>,
}

impl AssetValues {
    /// Returns the value for `asset`.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, _)| a == asset)
            .map(|(_, v)| *v)
    }

    /// Iterates over `(asset, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(a, v)| (a.as_str(), *v))
    }

    /// Returns the number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for AssetValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
