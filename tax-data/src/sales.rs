//! CSV loader for simulated sales.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column           | Required | Type    | Notes                                          |
//! |------------------|----------|---------|------------------------------------------------|
//! | `date`           | yes      | string  | Reporting month, `YYYY-MM`                     |
//! | `ticker`         | no       | string  | Leave empty when unknown                       |
//! | `asset_category` | yes      | string  | `equities`, `bank-equities`, `real-estate-fund`, `crypto`, `treasury` |
//! | `quantity`       | yes      | decimal | Units sold                                     |
//! | `sale_price`     | yes      | decimal | Price per unit                                 |
//! | `profit`         | yes      | decimal | `(sale_price - average price) * quantity`; may be negative |
//!
//! ### Example
//!
//! ```csv
//! date,ticker,asset_category,quantity,sale_price,profit
//! 2025-03,PETR4,equities,1000,25.00,6000.00
//! 2025-03,HGLG11,real-estate-fund,10,170.00,100.00
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{AssetCategory, ReportingMonth, ReportingMonthError, SaleEntryError, SimulatedSale};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    ticker: Option<String>,
    asset_category: String,
    quantity: Decimal,
    sale_price: Decimal,
    profit: Decimal,
}

/// How rows with an unrecognised `asset_category` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// Keep the row; the tax engine will ignore it.
    #[default]
    Lenient,
    /// Fail the load.
    Strict,
}

#[derive(Debug, Error)]
pub enum SalesLoadError {
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid date on row {row}: {source}")]
    InvalidDate {
        row: usize,
        #[source]
        source: ReportingMonthError,
    },

    #[error("unrecognised asset category '{category}' on row {row}")]
    UnrecognizedCategory { category: String, row: usize },

    #[error("invalid sale on row {row}: {source}")]
    InvalidSale {
        row: usize,
        #[source]
        source: SaleEntryError,
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
    policy: CategoryPolicy,
) -> Result<SimulatedSale, SalesLoadError> {
    let date: ReportingMonth = row.date.parse().map_err(|source| SalesLoadError::InvalidDate {
        row: row_number,
        source,
    })?;

    let asset_category = AssetCategory::from_tag(&row.asset_category);
    if !asset_category.is_recognized() {
        match policy {
            CategoryPolicy::Strict => {
                return Err(SalesLoadError::UnrecognizedCategory {
                    category: row.asset_category,
                    row: row_number,
                });
            }
            CategoryPolicy::Lenient => {
                warn!(
                    row = row_number,
                    category = %row.asset_category,
                    "unrecognised asset category; sale will not be taxed"
                );
            }
        }
    }

    let sale = SimulatedSale {
        ticker: row.ticker.filter(|t| !t.is_empty()),
        quantity: row.quantity,
        sale_price: row.sale_price,
        profit: row.profit,
        asset_category,
        date,
    };
    sale.validate().map_err(|source| SalesLoadError::InvalidSale {
        row: row_number,
        source,
    })?;

    Ok(sale)
}

/// Parses CSV text into sales, in file order.
///
/// # Errors
///
/// * [`SalesLoadError::Parse`] for structural problems or bad numbers.
/// * [`SalesLoadError::InvalidDate`] when `date` is not a valid `YYYY-MM`.
/// * [`SalesLoadError::UnrecognizedCategory`] under [`CategoryPolicy::Strict`].
/// * [`SalesLoadError::InvalidSale`] when `quantity` is not positive,
///   `sale_price` is negative, or their product overflows. Applies under
///   either policy.
pub fn load_sales_from_str(
    input: &str,
    policy: CategoryPolicy,
) -> Result<Vec<SimulatedSale>, SalesLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let sales = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1, policy)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = sales.len(), "parsed simulated sales");
    Ok(sales)
}

/// Reads a file from disk and delegates to [`load_sales_from_str`].
pub fn load_sales_from_file(
    path: &Path,
    policy: CategoryPolicy,
) -> Result<Vec<SimulatedSale>, SalesLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SalesLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_sales_from_str(&contents, policy)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    const HEADER: &str = "date,ticker,asset_category,quantity,sale_price,profit\n";

    /// Collects formatted log lines so tests can assert on them.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn init_captured_tracing(logs: &CapturedLogs) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn parses_a_single_sale() {
        let csv = format!("{HEADER}2025-03,PETR4,equities,1000,25.00,6000.00\n");

        let sales = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(
            sales,
            vec![SimulatedSale {
                ticker: Some("PETR4".to_string()),
                quantity: dec!(1000),
                sale_price: dec!(25.00),
                profit: dec!(6000.00),
                asset_category: AssetCategory::Equities,
                date: ReportingMonth::new(2025, 3).unwrap(),
            }]
        );
    }

    #[test]
    fn empty_ticker_becomes_none() {
        let csv = format!("{HEADER}2025-03,,crypto,0.5,300000,20000\n");

        let sales = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(sales[0].ticker, None);
        assert_eq!(sales[0].asset_category, AssetCategory::Crypto);
    }

    #[test]
    fn negative_profit_is_kept() {
        let csv = format!("{HEADER}2025-03,VALE3,equities,50,200,-200\n");

        let sales = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(sales[0].profit, dec!(-200));
    }

    #[test]
    fn columns_may_be_reordered() {
        let csv = "profit,quantity,sale_price,asset_category,date,ticker\n100,1,1,real-estate-fund,2025-02,HGLG11\n";

        let sales = load_sales_from_str(csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(sales[0].asset_category, AssetCategory::RealEstateFund);
        assert_eq!(sales[0].profit, dec!(100));
    }

    #[test]
    fn lenient_policy_keeps_unknown_category() {
        let csv = format!("{HEADER}2025-03,AAPL34,bdr,10,50,20\n");

        let sales = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(sales[0].asset_category, AssetCategory::Other("bdr".to_string()));
    }

    #[test]
    fn lenient_policy_warns_about_unknown_category() {
        let logs = CapturedLogs::default();
        let _guard = init_captured_tracing(&logs);
        let csv = format!("{HEADER}2025-03,PETR4,equities,1,1,0\n2025-03,AAPL34,bdr,10,50,20\n");

        load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        let output = logs.contents();
        assert!(output.contains("WARN"), "got: {output}");
        assert!(output.contains("unrecognised asset category"), "got: {output}");
        assert!(output.contains("category=bdr"), "got: {output}");
        assert!(output.contains("row=2"), "got: {output}");
    }

    #[test]
    fn recognised_categories_do_not_warn() {
        let logs = CapturedLogs::default();
        let _guard = init_captured_tracing(&logs);
        let csv = format!("{HEADER}2025-08,IPCA2035,treasury,3,3000,900\n");

        load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap();

        assert_eq!(logs.contents(), "");
    }

    #[test]
    fn negative_quantity_is_rejected_under_either_policy() {
        let csv = format!(
            "{HEADER}2025-03,PETR4,equities,1000,25,6000\n2025-03,VALE3,equities,-500,30,10\n"
        );

        for policy in [CategoryPolicy::Lenient, CategoryPolicy::Strict] {
            let err = load_sales_from_str(&csv, policy).unwrap_err();

            match err {
                SalesLoadError::InvalidSale { row, source } => {
                    assert_eq!(row, 2);
                    assert_eq!(source, SaleEntryError::NonPositiveQuantity(dec!(-500)));
                }
                other => panic!("expected InvalidSale, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let csv = format!("{HEADER}2025-03,PETR4,equities,0,25,0\n");

        let err = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap_err();

        assert!(
            matches!(
                err,
                SalesLoadError::InvalidSale {
                    row: 1,
                    source: SaleEntryError::NonPositiveQuantity(_),
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn negative_sale_price_is_rejected() {
        let csv = format!("{HEADER}2025-03,PETR4,equities,10,-1,-260\n");

        let err = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap_err();

        match err {
            SalesLoadError::InvalidSale { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, SaleEntryError::NegativeSalePrice(dec!(-1)));
            }
            other => panic!("expected InvalidSale, got {other:?}"),
        }
    }

    #[test]
    fn zero_sale_price_is_accepted() {
        let csv = format!("{HEADER}2025-03,OIBR3,equities,100,0,-500\n");

        let sales = load_sales_from_str(&csv, CategoryPolicy::Strict).unwrap();

        assert_eq!(sales[0].sale_price, dec!(0));
    }

    #[test]
    fn overflowing_sale_value_is_rejected() {
        let csv = format!("{HEADER}2025-03,PETR4,equities,9000000000000000000,1000000000000,1\n");

        let err = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap_err();

        assert!(
            matches!(
                err,
                SalesLoadError::InvalidSale {
                    row: 1,
                    source: SaleEntryError::ValueOverflow { .. },
                }
            ),
            "got {err:?}"
        );
        assert!(err.to_string().contains("row 1"), "got {err}");
    }

    #[test]
    fn strict_policy_rejects_unknown_category() {
        let csv = format!(
            "{HEADER}2025-03,PETR4,equities,1,1,0\n2025-03,AAPL34,bdr,10,50,20\n"
        );

        let err = load_sales_from_str(&csv, CategoryPolicy::Strict).unwrap_err();

        match err {
            SalesLoadError::UnrecognizedCategory { category, row } => {
                assert_eq!(category, "bdr");
                assert_eq!(row, 2);
            }
            other => panic!("expected UnrecognizedCategory, got {other:?}"),
        }
    }

    #[test]
    fn invalid_date_reports_row() {
        let csv = format!("{HEADER}2025-13,PETR4,equities,1,1,0\n");

        let err = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap_err();

        assert!(
            matches!(err, SalesLoadError::InvalidDate { row: 1, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn bad_decimal_is_a_parse_error() {
        let csv = format!("{HEADER}2025-03,PETR4,equities,abc,1,0\n");

        let err = load_sales_from_str(&csv, CategoryPolicy::Lenient).unwrap_err();

        assert!(matches!(err, SalesLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let csv = "date,asset_category,quantity\n2025-03,equities,1\n";

        let err = load_sales_from_str(csv, CategoryPolicy::Lenient).unwrap_err();

        let SalesLoadError::Parse(inner) = err else {
            panic!("expected Parse error, got: {err:?}");
        };
        assert!(inner.to_string().contains("missing field"), "got: {inner}");
    }

    #[test]
    fn header_only_yields_no_sales() {
        let sales = load_sales_from_str(HEADER, CategoryPolicy::Strict).unwrap();

        assert!(sales.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_sales_from_file(Path::new("does/not/exist.csv"), CategoryPolicy::Lenient)
            .unwrap_err();

        assert!(matches!(err, SalesLoadError::Io { .. }), "got {err:?}");
    }
}
