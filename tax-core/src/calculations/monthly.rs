//! Monthly capital-gains tax computation.
//!
//! # Rules
//!
//! | Bucket            | Categories                    | Exemption                        | Rate |
//! |-------------------|-------------------------------|----------------------------------|------|
//! | Equities          | `equities`, `bank-equities`   | total sales <= 20,000 in month   | 15%  |
//! | Real-estate funds | `real-estate-fund`            | none                             | 20%  |
//! | Crypto            | `crypto`                      | total sales <= 35,000 in month   | 15%  |
//!
//! The exemption is all-or-nothing on sales volume: once a bucket's sales
//! exceed its threshold, its whole positive profit is taxable. A bucket whose
//! profit is zero or negative never owes tax. Sales in any other category
//! are ignored.
//!
//! No rounding happens here; round only when presenting results. Sums
//! saturate at [`Decimal::MAX`] / [`Decimal::MIN`] instead of overflowing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxEngine;
//! use tax_core::{AssetCategory, ReportingMonth, SimulatedSale, TaxRules};
//!
//! let sales = vec![SimulatedSale {
//!     ticker: Some("VALE3".to_string()),
//!     quantity: dec!(1000),
//!     sale_price: dec!(25),
//!     profit: dec!(6000),
//!     asset_category: AssetCategory::Equities,
//!     date: ReportingMonth::new(2025, 5).unwrap(),
//! }];
//!
//! let rules = TaxRules::default();
//! let summary = TaxEngine::new(&rules).calculate(&sales);
//!
//! assert_eq!(summary.total_sales_equities, dec!(25000));
//! assert_eq!(summary.taxable_profit_equities, dec!(6000));
//! assert_eq!(summary.tax_due, dec!(900));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::max;
use crate::models::{BucketSummary, SimulatedSale, TaxBucket, TaxRules, TaxSummary};

/// Errors reported by [`TaxEngine::calculate_strict`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    /// A sale carries a category tag that is not recognised at all.
    #[error("sale {index} has unrecognised asset category '{category}'")]
    UnrecognizedCategory { category: String, index: usize },
}

/// Computes a [`TaxSummary`] for sales that all belong to one reporting month.
///
/// The engine does not filter by date; callers pass only the month's sales
/// (see [`crate::calculations::ReportingContext`]).
#[derive(Debug, Clone)]
pub struct TaxEngine<'a> {
    rules: &'a TaxRules,
}

impl<'a> TaxEngine<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Computes the month's summary. Total over its input: an empty slice
    /// yields an all-zero summary, and unrecognised categories are skipped.
    pub fn calculate(
        &self,
        sales: &[SimulatedSale],
    ) -> TaxSummary {
        let mut summary = TaxSummary::default();

        for &bucket in TaxBucket::all() {
            let (total_sales, profit) = self.accumulate(sales, bucket);
            let taxable_profit = self.taxable_profit(bucket, total_sales, profit);

            summary.set_bucket(
                bucket,
                BucketSummary {
                    total_sales,
                    profit,
                    taxable_profit,
                },
            );
            summary.tax_due = summary
                .tax_due
                .saturating_add(self.bucket_tax(bucket, taxable_profit));
        }

        let ignored = sales
            .iter()
            .filter(|sale| sale.asset_category.bucket().is_none())
            .count();
        if ignored > 0 {
            debug!(ignored, "sales outside the taxable buckets were skipped");
        }

        summary
    }

    /// Like [`TaxEngine::calculate`], but rejects sales whose category tag
    /// is not recognised. Recognised non-taxable categories such as
    /// `treasury` are still skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::UnrecognizedCategory`] for the first
    /// offending sale.
    pub fn calculate_strict(
        &self,
        sales: &[SimulatedSale],
    ) -> Result<TaxSummary, TaxEngineError> {
        if let Some((index, sale)) = sales
            .iter()
            .enumerate()
            .find(|(_, sale)| !sale.asset_category.is_recognized())
        {
            return Err(TaxEngineError::UnrecognizedCategory {
                category: sale.asset_category.as_str().to_string(),
                index,
            });
        }

        Ok(self.calculate(sales))
    }

    /// Sums sale value and profit over the sales routed to `bucket`.
    fn accumulate(
        &self,
        sales: &[SimulatedSale],
        bucket: TaxBucket,
    ) -> (Decimal, Decimal) {
        sales
            .iter()
            .filter(|sale| sale.asset_category.bucket() == Some(bucket))
            .fold((Decimal::ZERO, Decimal::ZERO), |(total, profit), sale| {
                (
                    total.saturating_add(sale.sale_value()),
                    profit.saturating_add(sale.profit),
                )
            })
    }

    /// Applies the bucket's exemption rule.
    ///
    /// Equality with the threshold is still exempt.
    fn taxable_profit(
        &self,
        bucket: TaxBucket,
        total_sales: Decimal,
        profit: Decimal,
    ) -> Decimal {
        let exempt = match self.rules.exemption_threshold(bucket) {
            Some(threshold) => total_sales <= threshold,
            None => false,
        };

        if exempt {
            Decimal::ZERO
        } else {
            max(profit, Decimal::ZERO)
        }
    }

    fn bucket_tax(
        &self,
        bucket: TaxBucket,
        taxable_profit: Decimal,
    ) -> Decimal {
        taxable_profit.saturating_mul(self.rules.rate(bucket))
    }
}

/// Computes a month's summary with the default [`TaxRules`].
pub fn calculate_monthly_tax(sales: &[SimulatedSale]) -> TaxSummary {
    TaxEngine::new(&TaxRules::default()).calculate(sales)
}
