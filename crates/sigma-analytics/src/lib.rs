//! # Sigma Analytics
//!
//! Risk and performance metrics computed from asset price histories.
//!
//! - **Returns**: simple period-over-period returns from prices
//! - **Risk-free alignment**: annual rates broadcast per period, or dated
//!   rate series matched to return dates by intersection
//! - **Metrics**: volatility, Sharpe, Sortino, max drawdown, VaR, CVaR,
//!   semi-deviation, Ulcer Index, mean absolute deviation
//! - **Collection**: every metric over every asset as a metric by asset table
//!
//! ## Design
//!
//! - **Pure calculators**: no state is kept between calls; returns are
//!   recomputed from prices for each analysis run
//! - **One formula, any cardinality**: calculators are generic over
//!   [`AssetSeries`], giving a scalar for one series and one value per
//!   asset for a table
//! - **NaN, not errors**: degenerate denominators yield `NaN`; only
//!   malformed input or out-of-order calls return [`SigmaError`](sigma_core::SigmaError)
//!
//! ## Usage
//!
//! ```rust
//! use sigma_analytics::prelude::*;
//! use sigma_core::{Date, TimeSeries};
//!
//! let d0 = Date::from_ymd(2025, 1, 2).unwrap();
//! let dates = (0..6).map(|i| d0.add_days(i)).collect();
//! let prices = TimeSeries::new(dates, vec![100.0, 101.0, 99.5, 100.2, 98.9, 101.3]).unwrap();
//!
//! let config = MetricsConfig::default();
//! let r = returns(&prices).unwrap();
//! let vol = volatility(&r, &config);
//! let sharpe = sharpe_ratio(&r, &RiskFree::Annual(0.05), &config);
//! assert!(vol > 0.0 && sharpe.is_finite());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: evaluate assets with rayon above `MetricsConfig::parallel_threshold`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod asset_series;
pub mod collection;
pub mod config;
pub mod metrics;
pub mod parallel;
pub mod returns;
pub mod risk_free;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::asset_series::{AssetSeries, AssetValues};
    pub use crate::collection::{MetricRow, MetricsCollection, MetricsTable, SummaryRow};
    pub use crate::config::{MetricsConfig, DEFAULT_CONFIDENCE, TRADING_DAYS_PER_YEAR};
    pub use crate::metrics::{
        conditional_value_at_risk, drawdown_series, max_drawdown, mean_absolute_deviation,
        semi_deviation, sharpe_ratio, sortino_ratio, ulcer_index, value_at_risk, volatility,
        MetricKind,
    };
    pub use crate::returns::{correlation_matrix, returns, CorrelationMatrix, PriceInput};
    pub use crate::risk_free::{align, annualized_rate_from_factor, Aligned, RiskFree};
}

pub use asset_series::{AssetSeries, AssetValues};
pub use collection::{MetricRow, MetricsCollection, MetricsTable, SummaryRow};
pub use config::{MetricsConfig, DEFAULT_CONFIDENCE, TRADING_DAYS_PER_YEAR};
pub use metrics::MetricKind;
pub use returns::{correlation_matrix, returns, CorrelationMatrix, PriceInput};
pub use risk_free::{align, annualized_rate_from_factor, Aligned, RiskFree};
