use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetCategory;

/// A position as supplied by the portfolio store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub category: AssetCategory,
    pub quantity: Decimal,
    pub average_purchase_price: Decimal,
}
