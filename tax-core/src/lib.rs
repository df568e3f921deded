pub mod calculations;
pub mod models;
pub mod portfolio;

pub use calculations::{ReportingContext, TaxEngine};
pub use models::*;
pub use portfolio::{InMemoryPortfolio, PortfolioRepository, RepositoryError};
