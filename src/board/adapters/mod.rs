//! Adapter implementations of the board ports.

mod directory;
mod gateway;
pub mod memory;
pub mod postgres;

pub use directory::RepositoryUserDirectory;
pub use gateway::RepositoryBoardGateway;
