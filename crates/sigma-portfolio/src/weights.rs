//! Portfolio weights.
//!
//! A [`WeightVector`] always sums to one. Weights that do not are scaled by
//! their sum on construction; this is reported through a `tracing` warning
//! and kept on the vector as a [`WeightNormalization`] so callers can act
//! on it. Negative weights (short positions) are allowed.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PortfolioError, PortfolioResult};

/// Absolute tolerance on the weight sum.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Record of a normalization applied on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightNormalization {
    /// The weight sum before normalization.
    pub original_sum: f64,
}

/// Asset weights that sum to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightVector {
    weights: Vec<(String, f64)>,
    normalization: Option<WeightNormalization>,
}

impl WeightVector {
    /// Creates a weight vector, normalizing if the weights do not sum to one.
    ///
    /// # Errors
    ///
    /// - `PortfolioError::InvalidWeight` if a weight is not finite
    /// - `PortfolioError::ZeroWeightSum` if the weights sum to zero (or
    ///   there are none)
    /// - `PortfolioError::Sigma` if an asset appears twice
    pub fn new<I, S>(weights: I) -> PortfolioResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, f64)> = Vec::new();
        for (asset, weight) in weights {
            let asset = asset.into();
            if !weight.is_finite() {
                return Err(PortfolioError::invalid_weight(asset, weight));
            }
            if entries.iter().any(|(a, _)| *a == asset) {
                return Err(PortfolioError::invalid_input(format!(
                    "duplicate weight for asset '{asset}'"
                )));
            }
            entries.push((asset, weight));
        }

        let sum: f64 = entries.iter().map(|(_, w)| w).sum();
        if sum.abs() < WEIGHT_SUM_TOLERANCE {
            return Err(PortfolioError::ZeroWeightSum);
        }

        let mut normalization = None;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(original_sum = sum, "weights do not sum to 1, normalizing");
            for (_, w) in &mut entries {
                *w /= sum;
            }
            normalization = Some(WeightNormalization { original_sum: sum });
        }

        Ok(Self {
            weights: entries,
            normalization,
        })
    }

    /// Equal weight across `assets`.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::EmptyPortfolio` if `assets` is empty.
    pub fn equal<S: AsRef<str>>(assets: &[S]) -> PortfolioResult<Self> {
        if assets.is_empty() {
            return Err(PortfolioError::EmptyPortfolio);
        }
        let w = 1.0 / assets.len() as f64;
        Self::new(assets.iter().map(|a| (a.as_ref().to_string(), w)))
    }

    /// Weight of `asset`, if it has one.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|(a, _)| a == asset)
            .map(|(_, w)| *w)
    }

    /// Iterates over `(asset, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(a, w)| (a.as_str(), *w))
    }

    /// Number of weighted assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if there are no weights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the weights (one, up to rounding).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    /// The normalization applied on construction, if any.
    #[must_use]
    pub fn normalization(&self) -> Option<WeightNormalization> {
        self.normalization
    }
}

// Decoded weights go through `WeightVector::new` so the unit sum holds
impl<'de> Deserialize<'de> for WeightVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct WeightVectorData {
            weights: Vec<(String, f64)>,
            #[serde(default)]
            normalization: Option<WeightNormalization>,
        }

        let data = WeightVectorData::deserialize(deserializer)?;
        let mut vector = WeightVector::new(data.weights).map_err(serde::de::Error::custom)?;
        // a stored vector is already normalized; keep its record
        if vector.normalization.is_none() {
            vector.normalization = data.normalization;
        }
        Ok(vector)
    }
}
