use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AssetCategory, Holding, ReportingMonth};

/// Errors raised while turning user input into a [`SimulatedSale`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaleEntryError {
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    #[error("sale price must be non-negative, got {0}")]
    NegativeSalePrice(Decimal),

    #[error("sale of {quantity} units at {sale_price} exceeds the decimal range")]
    ValueOverflow {
        quantity: Decimal,
        sale_price: Decimal,
    },

    #[error("cannot sell {requested} units of {ticker}: only {held} held")]
    InsufficientQuantity {
        ticker: String,
        requested: Decimal,
        held: Decimal,
    },
}

/// One hypothetical disposal of a position, used for what-if tax planning.
///
/// `profit` is precomputed when the sale is entered and is trusted as-is by
/// the tax engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedSale {
    pub ticker: Option<String>,
    pub quantity: Decimal,
    pub sale_price: Decimal,
    pub profit: Decimal,
    pub asset_category: AssetCategory,
    pub date: ReportingMonth,
}

impl SimulatedSale {
    /// Builds a sale of `quantity` units of `holding` at `sale_price`.
    ///
    /// Profit is `(sale_price - average_purchase_price) * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`SaleEntryError`] if the quantity is not positive, the price
    /// is negative, more units are sold than are held, or the sale value or
    /// profit does not fit in a [`Decimal`].
    pub fn from_holding(
        holding: &Holding,
        quantity: Decimal,
        sale_price: Decimal,
        date: ReportingMonth,
    ) -> Result<Self, SaleEntryError> {
        validate_entry(quantity, sale_price)?;
        if quantity > holding.quantity {
            return Err(SaleEntryError::InsufficientQuantity {
                ticker: holding.ticker.clone(),
                requested: quantity,
                held: holding.quantity,
            });
        }

        let profit = sale_price
            .checked_sub(holding.average_purchase_price)
            .and_then(|gain| gain.checked_mul(quantity))
            .ok_or(SaleEntryError::ValueOverflow {
                quantity,
                sale_price,
            })?;

        Ok(Self {
            ticker: Some(holding.ticker.clone()),
            quantity,
            sale_price,
            profit,
            asset_category: holding.category.clone(),
            date,
        })
    }

    /// Checks a sale built from external input before it reaches the tax
    /// engine.
    ///
    /// # Errors
    ///
    /// Returns [`SaleEntryError`] if the quantity is not positive, the price
    /// is negative, or `quantity * sale_price` overflows.
    pub fn validate(&self) -> Result<(), SaleEntryError> {
        validate_entry(self.quantity, self.sale_price)
    }

    /// Gross value of the sale: `quantity * sale_price`, saturating at
    /// [`Decimal::MAX`].
    pub fn sale_value(&self) -> Decimal {
        self.quantity.saturating_mul(self.sale_price)
    }
}

fn validate_entry(
    quantity: Decimal,
    sale_price: Decimal,
) -> Result<(), SaleEntryError> {
    if quantity <= Decimal::ZERO {
        return Err(SaleEntryError::NonPositiveQuantity(quantity));
    }
    if sale_price < Decimal::ZERO {
        return Err(SaleEntryError::NegativeSalePrice(sale_price));
    }
    if quantity.checked_mul(sale_price).is_none() {
        return Err(SaleEntryError::ValueOverflow {
            quantity,
            sale_price,
        });
    }
    Ok(())
}
