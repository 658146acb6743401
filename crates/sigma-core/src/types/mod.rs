//! Domain types for the Sigma engine.

mod date;
mod series;
mod table;

pub use date::Date;
pub use series::TimeSeries;
pub use table::{PriceTable, Prices, ReturnTable, Returns, Table, TableKind};
