//! Configuration for metric computation.

use serde::{Deserialize, Serialize};
use sigma_core::{SigmaError, SigmaResult};

/// Trading days per year, the default annualization factor.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default VaR/CVaR confidence level.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Configuration for metric computation.
///
/// Controls annualization, the tail confidence level and parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Number of return observations per year, used to annualize.
    pub periods_per_year: f64,

    /// Confidence level for VaR and CVaR (e.g. 0.95).
    pub confidence: f64,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum asset count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS_PER_YEAR,
            confidence: DEFAULT_CONFIDENCE,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl MetricsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_periods_per_year(mut self, periods: f64) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Sets the VaR/CVaR confidence level.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Checks the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns `SigmaError::InvalidInput` if `periods_per_year` is not a
    /// positive finite number or `confidence` is not strictly between 0 and 1.
    pub fn validate(&self) -> SigmaResult<()> {
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(SigmaError::invalid_input(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(SigmaError::invalid_input(format!(
                "confidence must be between 0 and 1, got {}",
                self.confidence
            )));
        }
        Ok(())
    }

    /// Square root of the annualization factor, the scale for period
    /// standard deviations and Sharpe-type ratios.
    #[must_use]
    pub fn annualization_scale(&self) -> f64 {
        self.periods_per_year.sqrt()
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = MetricsConfig::default();
        assert_eq!(config.periods_per_year, 252.0);
        assert_eq!(config.confidence, 0.95);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MetricsConfig::new()
            .with_periods_per_year(12.0)
            .with_confidence(0.99)
            .with_parallel(false)
            .with_threshold(8);

        assert_eq!(config.periods_per_year, 12.0);
        assert_eq!(config.confidence, 0.99);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MetricsConfig::new().with_periods_per_year(0.0).validate().is_err());
        assert!(MetricsConfig::new()
            .with_periods_per_year(f64::NAN)
            .validate()
            .is_err());
        assert!(MetricsConfig::new().with_confidence(1.0).validate().is_err());
        assert!(MetricsConfig::new().with_confidence(0.0).validate().is_err());
    }

    #[test]
    fn test_should_parallelize() {
        let config = MetricsConfig::new().with_threshold(10);

        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(5));
            assert!(config.should_parallelize(10));
        }

        #[cfg(not(feature = "parallel"))]
        {
            assert!(!config.should_parallelize(5));
            assert!(!config.should_parallelize(10));
        }

        assert!(!MetricsConfig::sequential().with_threshold(0).should_parallelize(100));
    }

    #[test]
    fn test_serde() {
        let config = MetricsConfig::new().with_periods_per_year(52.0);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: MetricsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // missing fields fall back to defaults
        let partial: MetricsConfig = serde_json::from_str(r#"{"confidence": 0.99}"#).unwrap();
        assert_eq!(partial.confidence, 0.99);
        assert_eq!(partial.periods_per_year, 252.0);
    }
}
