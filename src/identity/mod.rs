//! User accounts for Crewboard.
//!
//! Covers registration and login against an external credential collaborator,
//! the daily login streak counter, activity tracking, and the five-minute
//! presence window. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
