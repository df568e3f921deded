//! CSV loader for portfolio holdings.
//!
//! Columns: `ticker`, `category`, `quantity`, `average_purchase_price`.
//!
//! ```csv
//! ticker,category,quantity,average_purchase_price
//! PETR4,equities,1000,19.00
//! HGLG11,real-estate-fund,40,160.00
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AssetCategory, Holding};
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct CsvRow {
    ticker: String,
    category: String,
    quantity: Decimal,
    average_purchase_price: Decimal,
}

#[derive(Debug, Error)]
pub enum HoldingsLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("empty ticker on row {0}")]
    EmptyTicker(usize),

    #[error("negative quantity {quantity} for {ticker} on row {row}")]
    NegativeQuantity {
        ticker: String,
        quantity: Decimal,
        row: usize,
    },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Holding, HoldingsLoadError> {
    if row.ticker.is_empty() {
        return Err(HoldingsLoadError::EmptyTicker(row_number));
    }
    if row.quantity < Decimal::ZERO {
        return Err(HoldingsLoadError::NegativeQuantity {
            ticker: row.ticker,
            quantity: row.quantity,
            row: row_number,
        });
    }

    Ok(Holding {
        ticker: row.ticker,
        category: AssetCategory::from_tag(&row.category),
        quantity: row.quantity,
        average_purchase_price: row.average_purchase_price,
    })
}

pub fn load_holdings_from_str(input: &str) -> Result<Vec<Holding>, HoldingsLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

pub fn load_holdings_from_file(path: &Path) -> Result<Vec<Holding>, HoldingsLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| HoldingsLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_holdings_from_str(&contents)
}
