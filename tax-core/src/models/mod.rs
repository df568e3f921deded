mod asset_category;
mod holding;
mod payment_slip;
mod reporting_month;
mod simulated_sale;
mod tax_rules;
mod tax_summary;

pub use asset_category::{AssetCategory, TaxBucket};
pub use holding::Holding;
pub use payment_slip::PaymentSlip;
pub use reporting_month::{ReportingMonth, ReportingMonthError};
pub use simulated_sale::{SaleEntryError, SimulatedSale};
pub use tax_rules::{TaxRules, TaxRulesError};
pub use tax_summary::{BucketSummary, TaxSummary};
