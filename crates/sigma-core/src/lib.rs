//! # Sigma Core
//!
//! Core types and error taxonomy for the Sigma risk metrics engine.
//!
//! - **Types**: [`Date`](types::Date), [`TimeSeries`](types::TimeSeries) and
//!   the date-indexed, asset-keyed [`PriceTable`](types::PriceTable) /
//!   [`ReturnTable`](types::ReturnTable)
//! - **Errors**: [`SigmaError`] separating bad input from calls made out of
//!   order. Numerically undefined results are `NaN`, never errors.
//!
//! ## Example
//!
//! ```rust
//! use sigma_core::prelude::*;
//!
//! let d0 = Date::from_ymd(2025, 1, 2).unwrap();
//! let prices = PriceTable::new(
//!     vec![d0, d0.add_days(1), d0.add_days(2)],
//!     vec![("PETR4".to_string(), vec![100.0, 110.0, 99.0])],
//! )
//! .unwrap();
//! assert_eq!(prices.n_rows(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SigmaError, SigmaResult};
    pub use crate::types::{Date, PriceTable, ReturnTable, Table, TableKind, TimeSeries};
}

pub use error::{SigmaError, SigmaResult};
pub use types::{Date, PriceTable, ReturnTable, TimeSeries};
