use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::repository::{PortfolioRepository, RepositoryError};
use crate::models::{ReportingMonth, SaleEntryError, SimulatedSale};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    SaleEntry(#[from] SaleEntryError),
}

/// Looks up `ticker` in the portfolio and builds a simulated sale from it.
pub async fn simulate_sale<R>(
    repo: &R,
    ticker: &str,
    quantity: Decimal,
    sale_price: Decimal,
    date: ReportingMonth,
) -> Result<SimulatedSale, SimulationError>
where
    R: PortfolioRepository + ?Sized,
{
    let holding = repo.get_holding(ticker).await?;
    let sale = SimulatedSale::from_holding(&holding, quantity, sale_price, date)?;

    debug!(
        ticker,
        %quantity,
        %sale_price,
        profit = %sale.profit,
        "simulated sale created"
    );

    Ok(sale)
}
