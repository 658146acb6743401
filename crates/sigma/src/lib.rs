//! # Sigma
//!
//! Risk and performance metrics for asset price histories, and weighted
//! portfolio statistics.
//!
//! This crate re-exports the public API of the workspace:
//!
//! - [`core`](sigma_core): dates, time series, price and return tables, errors
//! - [`math`]: descriptive statistics and empirical quantiles
//! - [`analytics`]: returns, risk-free alignment, the metric calculators and
//!   the metrics collection
//! - [`portfolio`]: weights, portfolio aggregation, strategy comparison
//!
//! ## Example
//!
//! ```rust
//! use sigma::prelude::*;
//!
//! let d0 = Date::from_ymd(2025, 1, 2).unwrap();
//! let dates: Vec<Date> = (0..5).map(|i| d0.add_days(i)).collect();
//! let prices = PriceTable::new(
//!     dates,
//!     vec![
//!         ("ITUB4".to_string(), vec![33.0, 33.4, 32.8, 33.9, 34.1]),
//!         ("BBDC4".to_string(), vec![13.0, 12.8, 13.1, 12.9, 13.3]),
//!     ],
//! )
//! .unwrap();
//!
//! let mut collection = MetricsCollection::new(MetricsConfig::default()).unwrap();
//! collection.compute_all(&prices, &RiskFree::Annual(0.1075)).unwrap();
//! let summary = collection.latest().unwrap();
//! assert_eq!(summary.len(), 2);
//!
//! let portfolio = PortfolioAggregator::new(&prices, None).unwrap();
//! assert!(portfolio.statistics().unwrap().max_drawdown <= 0.0);
//! ```

#![warn(missing_docs)]

pub use sigma_analytics as analytics;
pub use sigma_math as math;
pub use sigma_portfolio as portfolio;

pub use sigma_core::{Date, PriceTable, ReturnTable, SigmaError, SigmaResult, TimeSeries};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sigma_analytics::prelude::*;
    pub use sigma_core::prelude::*;
    pub use sigma_portfolio::prelude::*;
}
