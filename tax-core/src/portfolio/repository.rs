use async_trait::async_trait;
use thiserror::Error;

use crate::models::Holding;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("holding not found: {0}")]
    NotFound(String),

    #[error("portfolio backend error: {0}")]
    Backend(String),
}

/// Read access to the user's holdings, used to seed simulated sales.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn get_holding(
        &self,
        ticker: &str,
    ) -> Result<Holding, RepositoryError>;

    async fn list_holdings(&self) -> Result<Vec<Holding>, RepositoryError>;
}
