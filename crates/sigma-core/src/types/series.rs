//! Dated single-asset series.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{SigmaError, SigmaResult};

/// An ordered, date-indexed sequence of real values.
///
/// Used for single-asset prices, single-asset returns and dated risk-free
/// rates. Dates are strictly increasing, so there are no duplicate
/// timestamps; gaps (non-trading days) are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSeries {
    pub(crate) dates: Vec<Date>,
    pub(crate) values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a new series.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if the lengths differ or the dates
    /// are not strictly increasing.
    pub fn new(dates: Vec<Date>, values: Vec<f64>) -> SigmaResult<Self> {
        if dates.len() != values.len() {
            return Err(SigmaError::invalid_input(format!(
                "dates and values must have same length: {} vs {}",
                dates.len(),
                values.len()
            )));
        }
        check_strictly_increasing(&dates)?;
        Ok(Self { dates, values })
    }

    /// Creates a series from `(date, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if the dates are not strictly increasing.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Date, f64)>) -> SigmaResult<Self> {
        let (dates, values) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the date index.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Looks up the value observed on `date`.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.values[i])
    }

    /// Returns the last observation.
    #[must_use]
    pub fn last(&self) -> Option<(Date, f64)> {
        self.dates.last().copied().zip(self.values.last().copied())
    }

    /// Keeps only the rows at the given (ascending) positions.
    #[must_use]
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            dates: rows.iter().map(|&i| self.dates[i]).collect(),
            values: rows.iter().map(|&i| self.values[i]).collect(),
        }
    }

    /// Applies `f(row, value)` to every observation, keeping the dates.
    #[must_use]
    pub fn map_rows(&self, f: impl Fn(usize, f64) -> f64) -> Self {
        Self {
            dates: self.dates.clone(),
            values: self
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| f(i, v))
                .collect(),
        }
    }
}

// Routed through `TimeSeries::new` so decoded series keep their date order
impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct TimeSeriesData {
            dates: Vec<Date>,
            values: Vec<f64>,
        }

        let data = TimeSeriesData::deserialize(deserializer)?;
        TimeSeries::new(data.dates, data.values).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn check_strictly_increasing(dates: &[Date]) -> SigmaResult<()> {
    if let Some(pair) = dates.windows(2).find(|w| w[1] <= w[0]) {
        return Err(SigmaError::invalid_input(format!(
            "dates must be strictly increasing: {} followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}
