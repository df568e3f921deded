use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{PortfolioRepository, RepositoryError};
use crate::models::Holding;

/// Holdings kept in memory, keyed by ticker.
///
/// Loading the same ticker twice keeps the last record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolio {
    holdings: BTreeMap<String, Holding>,
}

impl InMemoryPortfolio {
    pub fn new(holdings: impl IntoIterator<Item = Holding>) -> Self {
        let mut portfolio = Self::default();
        for holding in holdings {
            portfolio.insert(holding);
        }
        portfolio
    }

    pub fn insert(
        &mut self,
        holding: Holding,
    ) {
        self.holdings.insert(holding.ticker.clone(), holding);
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolio {
    async fn get_holding(
        &self,
        ticker: &str,
    ) -> Result<Holding, RepositoryError> {
        self.holdings
            .get(ticker)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(ticker.to_string()))
    }

    async fn list_holdings(&self) -> Result<Vec<Holding>, RepositoryError> {
        Ok(self.holdings.values().cloned().collect())
    }
}
