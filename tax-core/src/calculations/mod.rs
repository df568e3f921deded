//! Capital-gains tax calculations.
//!
//! [`TaxEngine`] computes one reporting month from a list of simulated
//! sales. [`ReportingContext`] pairs that list with its month, and
//! [`AnnualTaxAggregator`] runs the monthly engine over a whole year.

pub mod annual;
pub mod common;
pub mod context;
pub mod monthly;

pub use annual::{AnnualTaxAggregator, AnnualTaxReport, MonthlyTaxReport};
pub use context::ReportingContext;
pub use monthly::{TaxEngine, TaxEngineError, calculate_monthly_tax};
