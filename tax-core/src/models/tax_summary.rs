use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBucket;

/// Per-bucket view over a [`TaxSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_profit: Decimal,
}

/// Tax outcome of one reporting month.
///
/// `profit_*` keeps realized losses as negative values; `taxable_profit_*` is
/// never negative and never exceeds the matching profit. Amounts serialize as
/// JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales_equities: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales_reit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales_crypto: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_equities: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_reit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_crypto: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_profit_equities: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_profit_reit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_profit_crypto: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_due: Decimal,
}

impl TaxSummary {
    pub fn bucket(
        &self,
        bucket: TaxBucket,
    ) -> BucketSummary {
        match bucket {
            TaxBucket::Equities => BucketSummary {
                total_sales: self.total_sales_equities,
                profit: self.profit_equities,
                taxable_profit: self.taxable_profit_equities,
            },
            TaxBucket::RealEstateFund => BucketSummary {
                total_sales: self.total_sales_reit,
                profit: self.profit_reit,
                taxable_profit: self.taxable_profit_reit,
            },
            TaxBucket::Crypto => BucketSummary {
                total_sales: self.total_sales_crypto,
                profit: self.profit_crypto,
                taxable_profit: self.taxable_profit_crypto,
            },
        }
    }

    pub(crate) fn set_bucket(
        &mut self,
        bucket: TaxBucket,
        summary: BucketSummary,
    ) {
        let (total_sales, profit, taxable_profit) = match bucket {
            TaxBucket::Equities => (
                &mut self.total_sales_equities,
                &mut self.profit_equities,
                &mut self.taxable_profit_equities,
            ),
            TaxBucket::RealEstateFund => (
                &mut self.total_sales_reit,
                &mut self.profit_reit,
                &mut self.taxable_profit_reit,
            ),
            TaxBucket::Crypto => (
                &mut self.total_sales_crypto,
                &mut self.profit_crypto,
                &mut self.taxable_profit_crypto,
            ),
        };

        *total_sales = summary.total_sales;
        *profit = summary.profit;
        *taxable_profit = summary.taxable_profit;
    }

    pub fn has_tax_due(&self) -> bool {
        self.tax_due > Decimal::ZERO
    }
}
