//! # Sigma Portfolio
//!
//! Weighted portfolio statistics over a multi-asset price table.
//!
//! - **Weights**: [`WeightVector`] always sums to one; other sums are
//!   normalized with a warning, and short positions are allowed
//! - **Aggregation**: [`PortfolioAggregator`] builds the portfolio return
//!   and value paths and their statistics
//! - **Comparison**: the same prices under several weightings, one row per
//!   strategy
//!
//! ## Quick Start
//!
//! ```rust
//! use sigma_core::{Date, PriceTable};
//! use sigma_portfolio::prelude::*;
//!
//! let d0 = Date::from_ymd(2025, 1, 2).unwrap();
//! let dates = (0..4).map(|i| d0.add_days(i)).collect();
//! let prices = PriceTable::new(
//!     dates,
//!     vec![
//!         ("PETR4".to_string(), vec![38.0, 38.5, 37.9, 38.8]),
//!         ("VALE3".to_string(), vec![61.0, 60.2, 61.5, 62.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let portfolio = PortfolioAggregator::new(&prices, None).unwrap();
//! let stats = portfolio.statistics().unwrap();
//! assert!(stats.max_drawdown <= 0.0);
//!
//! let strategies = sample_strategies(prices.assets()).unwrap();
//! let table = portfolio.compare(&strategies).unwrap();
//! assert_eq!(table.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: evaluate strategies with rayon above the configured threshold

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod error;
pub mod weights;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregator::{
        sample_strategies, ComparisonTable, PortfolioAggregator, PortfolioStatistics, StrategyRow,
    };
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::weights::{WeightNormalization, WeightVector, WEIGHT_SUM_TOLERANCE};
}

pub use aggregator::{
    sample_strategies, ComparisonTable, PortfolioAggregator, PortfolioStatistics, StrategyRow,
};
pub use error::{PortfolioError, PortfolioResult};
pub use weights::{WeightNormalization, WeightVector, WEIGHT_SUM_TOLERANCE};
