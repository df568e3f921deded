//! CSV loaders for simulated sales and portfolio holdings.

pub mod holdings;
pub mod sales;

pub use holdings::{HoldingsLoadError, load_holdings_from_file, load_holdings_from_str};
pub use sales::{CategoryPolicy, SalesLoadError, load_sales_from_file, load_sales_from_str};
