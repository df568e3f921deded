//! The portfolio store seam: where holdings come from when a sale is simulated.

pub mod memory;
pub mod repository;
pub mod simulation;

pub use memory::InMemoryPortfolio;
pub use repository::{PortfolioRepository, RepositoryError};
pub use simulation::{SimulationError, simulate_sale};
