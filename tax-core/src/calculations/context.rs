use serde::{Deserialize, Serialize};

use crate::calculations::TaxEngine;
use crate::models::{PaymentSlip, ReportingMonth, SimulatedSale, TaxRules, TaxSummary};

/// A reporting month together with the sales that belong to it.
///
/// Summaries are recomputed from scratch on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingContext {
    pub month: ReportingMonth,
    pub sales: Vec<SimulatedSale>,
}

impl ReportingContext {
    /// Wraps sales the caller has already restricted to `month`.
    pub fn new(
        month: ReportingMonth,
        sales: Vec<SimulatedSale>,
    ) -> Self {
        Self { month, sales }
    }

    /// Selects the sales dated in `month` out of an arbitrary list.
    pub fn for_month(
        month: ReportingMonth,
        sales: &[SimulatedSale],
    ) -> Self {
        let sales = sales
            .iter()
            .filter(|sale| sale.date == month)
            .cloned()
            .collect();

        Self { month, sales }
    }

    pub fn summary(
        &self,
        rules: &TaxRules,
    ) -> TaxSummary {
        TaxEngine::new(rules).calculate(&self.sales)
    }

    pub fn payment_slip(
        &self,
        rules: &TaxRules,
    ) -> Option<PaymentSlip> {
        PaymentSlip::for_summary(self.month, &self.summary(rules))
    }
}
