use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxBucket;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRulesError {
    #[error("tax rate for {bucket} must be between 0 and 1, got {rate}")]
    InvalidRate { bucket: TaxBucket, rate: Decimal },

    #[error("exemption threshold for {bucket} must be non-negative, got {threshold}")]
    InvalidThreshold {
        bucket: TaxBucket,
        threshold: Decimal,
    },
}

/// Exemption thresholds and rates applied per reporting month.
///
/// Thresholds are monthly total-sales volumes in the portfolio's home
/// currency. Sales totals at or below the threshold exempt the whole bucket.
/// Real-estate funds have no exemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    pub equities_exemption_threshold: Decimal,
    pub crypto_exemption_threshold: Decimal,
    pub equities_rate: Decimal,
    pub real_estate_fund_rate: Decimal,
    pub crypto_rate: Decimal,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            equities_exemption_threshold: Decimal::from(20_000),
            crypto_exemption_threshold: Decimal::from(35_000),
            equities_rate: Decimal::new(15, 2),
            real_estate_fund_rate: Decimal::new(20, 2),
            crypto_rate: Decimal::new(15, 2),
        }
    }
}

impl TaxRules {
    /// Monthly sales volume at or below which the bucket is exempt.
    pub fn exemption_threshold(
        &self,
        bucket: TaxBucket,
    ) -> Option<Decimal> {
        match bucket {
            TaxBucket::Equities => Some(self.equities_exemption_threshold),
            TaxBucket::RealEstateFund => None,
            TaxBucket::Crypto => Some(self.crypto_exemption_threshold),
        }
    }

    pub fn rate(
        &self,
        bucket: TaxBucket,
    ) -> Decimal {
        match bucket {
            TaxBucket::Equities => self.equities_rate,
            TaxBucket::RealEstateFund => self.real_estate_fund_rate,
            TaxBucket::Crypto => self.crypto_rate,
        }
    }

    /// Checks that every rate lies in `[0, 1]` and every threshold is non-negative.
    pub fn validate(&self) -> Result<(), TaxRulesError> {
        for &bucket in TaxBucket::all() {
            let rate = self.rate(bucket);
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(TaxRulesError::InvalidRate { bucket, rate });
            }

            if let Some(threshold) = self.exemption_threshold(bucket) {
                if threshold < Decimal::ZERO {
                    return Err(TaxRulesError::InvalidThreshold { bucket, threshold });
                }
            }
        }

        Ok(())
    }
}
