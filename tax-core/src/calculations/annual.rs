//! Yearly roll-up of monthly tax summaries.
//!
//! Each month is computed independently by [`TaxEngine`]: losses in one
//! month are not carried into another.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::TaxEngine;
use crate::models::{
    BucketSummary, PaymentSlip, ReportingMonth, SimulatedSale, TaxBucket, TaxRules, TaxSummary,
};

/// One month of an [`AnnualTaxReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTaxReport {
    pub month: ReportingMonth,
    pub sale_count: usize,
    pub summary: TaxSummary,
}

/// Monthly summaries for every month of `year` that had at least one sale,
/// in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualTaxReport {
    pub year: i32,
    pub months: Vec<MonthlyTaxReport>,
    /// Sales dated outside `year`.
    pub skipped_sales: usize,
}

impl AnnualTaxReport {
    pub fn total_tax_due(&self) -> Decimal {
        self.months
            .iter()
            .fold(Decimal::ZERO, |total, m| total.saturating_add(m.summary.tax_due))
    }

    pub fn bucket_totals(
        &self,
        bucket: TaxBucket,
    ) -> BucketSummary {
        self.months
            .iter()
            .map(|m| m.summary.bucket(bucket))
            .fold(BucketSummary::default(), |acc, view| BucketSummary {
                total_sales: acc.total_sales.saturating_add(view.total_sales),
                profit: acc.profit.saturating_add(view.profit),
                taxable_profit: acc.taxable_profit.saturating_add(view.taxable_profit),
            })
    }

    pub fn total_sales(
        &self,
        bucket: TaxBucket,
    ) -> Decimal {
        self.bucket_totals(bucket).total_sales
    }

    pub fn total_profit(
        &self,
        bucket: TaxBucket,
    ) -> Decimal {
        self.bucket_totals(bucket).profit
    }

    pub fn total_taxable_profit(
        &self,
        bucket: TaxBucket,
    ) -> Decimal {
        self.bucket_totals(bucket).taxable_profit
    }

    /// One slip per month that owes tax.
    pub fn payment_slips(&self) -> Vec<PaymentSlip> {
        self.months
            .iter()
            .filter_map(|m| PaymentSlip::for_summary(m.month, &m.summary))
            .collect()
    }

    pub fn month(
        &self,
        month: ReportingMonth,
    ) -> Option<&MonthlyTaxReport> {
        self.months.iter().find(|m| m.month == month)
    }
}

#[derive(Debug, Clone)]
pub struct AnnualTaxAggregator<'a> {
    rules: &'a TaxRules,
}

impl<'a> AnnualTaxAggregator<'a> {
    pub fn new(rules: &'a TaxRules) -> Self {
        Self { rules }
    }

    /// Groups `sales` by month and runs the monthly engine on each group.
    pub fn aggregate(
        &self,
        year: i32,
        sales: &[SimulatedSale],
    ) -> AnnualTaxReport {
        let mut by_month: BTreeMap<ReportingMonth, Vec<SimulatedSale>> = BTreeMap::new();
        let mut skipped_sales = 0;

        for sale in sales {
            if sale.date.year() == year {
                by_month.entry(sale.date).or_default().push(sale.clone());
            } else {
                skipped_sales += 1;
            }
        }

        if skipped_sales > 0 {
            debug!(year, skipped_sales, "ignoring sales dated outside the year");
        }

        let engine = TaxEngine::new(self.rules);
        let months: Vec<_> = by_month
            .into_iter()
            .map(|(month, month_sales)| MonthlyTaxReport {
                month,
                sale_count: month_sales.len(),
                summary: engine.calculate(&month_sales),
            })
            .collect();

        let report = AnnualTaxReport {
            year,
            months,
            skipped_sales,
        };

        info!(
            year,
            months = report.months.len(),
            tax_due = %report.total_tax_due(),
            "annual tax report computed"
        );

        report
    }
}
