//! Projects, memberships, and role-based permissions for Crewboard.
//!
//! A project is created by its immutable owner, carries a shareable invite
//! code, and holds named roles whose permission sets gate member actions.
//! Members hold one or more role names; effective permissions are the union
//! over those roles, with the creator and `is_admin` roles granting
//! everything. The module follows hexagonal architecture:
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
