//! Date-indexed, asset-keyed tables.
//!
//! A table holds one column per asset over a shared date index. The
//! [`Prices`] and [`Returns`] markers keep price tables and return tables
//! from being mixed up while sharing one implementation.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use super::series::check_strictly_increasing;
use super::{Date, TimeSeries};
use crate::error::{SigmaError, SigmaResult};

/// Distinguishes what the values of a [`Table`] represent.
pub trait TableKind: fmt::Debug + Clone + Send + Sync + 'static {
    /// Human readable name used in error messages.
    const LABEL: &'static str;

    /// Returns true if `value` is admissible in a table of this kind.
    fn accepts(value: f64) -> bool;
}

/// Marker for tables of strictly positive prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prices;

/// Marker for tables of period-over-period returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Returns;

impl TableKind for Prices {
    const LABEL: &'static str = "price";

    fn accepts(value: f64) -> bool {
        value.is_finite() && value > 0.0
    }
}

impl TableKind for Returns {
    const LABEL: &'static str = "return";

    fn accepts(value: f64) -> bool {
        value.is_finite()
    }
}

/// Multi-asset table of prices.
pub type PriceTable = Table<Prices>;

/// Multi-asset table of returns.
pub type ReturnTable = Table<Returns>;

/// A rectangular table: rows are dates, columns are assets.
///
/// Column order is the order in which assets were supplied and is kept
/// for every derived table, so downstream output is reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<K: TableKind> {
    dates: Vec<Date>,
    assets: Vec<String>,
    columns: Vec<Vec<f64>>,
    kind: PhantomData<K>,
}

impl<K: TableKind> Table<K> {
    /// Creates a table from a date index and named columns.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if:
    /// - there are no columns
    /// - dates are not strictly increasing
    /// - an asset identifier is repeated
    /// - a column length differs from the date index
    /// - a value is not admissible for the table kind
    pub fn new(dates: Vec<Date>, columns: Vec<(String, Vec<f64>)>) -> SigmaResult<Self> {
        if columns.is_empty() {
            return Err(SigmaError::invalid_input(format!(
                "{} table has no assets",
                K::LABEL
            )));
        }
        check_strictly_increasing(&dates)?;

        let mut seen = HashSet::with_capacity(columns.len());
        let mut assets = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());

        for (asset, column) in columns {
            if !seen.insert(asset.clone()) {
                return Err(SigmaError::invalid_input(format!(
                    "duplicate asset '{asset}'"
                )));
            }
            if column.len() != dates.len() {
                return Err(SigmaError::invalid_input(format!(
                    "column '{asset}' has {} rows, index has {}",
                    column.len(),
                    dates.len()
                )));
            }
            if let Some((row, bad)) = column.iter().enumerate().find(|(_, v)| !K::accepts(**v)) {
                return Err(SigmaError::invalid_input(format!(
                    "invalid {} for '{asset}' on {}: {bad}",
                    K::LABEL,
                    dates[row]
                )));
            }
            assets.push(asset);
            values.push(column);
        }

        Ok(Self {
            dates,
            assets,
            columns: values,
            kind: PhantomData,
        })
    }

    /// Creates a table from named single-asset series sharing one date index.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if the series do not share the same
    /// dates or any value is inadmissible.
    pub fn from_series(series: Vec<(String, TimeSeries)>) -> SigmaResult<Self> {
        let dates = match series.first() {
            Some((_, first)) => first.dates().to_vec(),
            None => Vec::new(),
        };
        let mut columns = Vec::with_capacity(series.len());
        for (asset, s) in series {
            if s.dates() != dates.as_slice() {
                return Err(SigmaError::invalid_input(format!(
                    "series '{asset}' does not share the table date index"
                )));
            }
            columns.push((asset, s.values().to_vec()));
        }
        Self::new(dates, columns)
    }

    /// Returns the date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the asset identifiers in column order.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    /// Returns the number of asset columns.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns true if the table has a column for `asset`.
    #[must_use]
    pub fn contains(&self, asset: &str) -> bool {
        self.assets.iter().any(|a| a == asset)
    }

    /// Returns the column for `asset`.
    #[must_use]
    pub fn column(&self, asset: &str) -> Option<&[f64]> {
        self.assets
            .iter()
            .position(|a| a == asset)
            .map(|i| self.columns[i].as_slice())
    }

    /// Iterates over `(asset, column)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.assets
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Extracts one asset as a dated series.
    #[must_use]
    pub fn series(&self, asset: &str) -> Option<TimeSeries> {
        self.column(asset).map(|values| TimeSeries {
            dates: self.dates.clone(),
            values: values.to_vec(),
        })
    }

    /// Keeps only the rows at the given (ascending) positions.
    #[must_use]
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            dates: rows.iter().map(|&i| self.dates[i]).collect(),
            assets: self.assets.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| rows.iter().map(|&i| col[i]).collect())
                .collect(),
            kind: PhantomData,
        }
    }

    /// Applies `f(row, value)` to every cell, keeping dates and assets.
    #[must_use]
    pub fn map_rows(&self, f: impl Fn(usize, f64) -> f64) -> Self {
        Self {
            dates: self.dates.clone(),
            assets: self.assets.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| col.iter().enumerate().map(|(i, &v)| f(i, v)).collect())
                .collect(),
            kind: PhantomData,
        }
    }
}
