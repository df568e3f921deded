use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ReportingMonth, TaxSummary};

/// Data handed to the payment-slip document generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSlip {
    pub period: ReportingMonth,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_due: Decimal,
}

impl PaymentSlip {
    /// Returns `None` when the month owes nothing.
    pub fn for_summary(
        period: ReportingMonth,
        summary: &TaxSummary,
    ) -> Option<Self> {
        summary.has_tax_due().then(|| Self {
            period,
            tax_due: summary.tax_due,
        })
    }
}
