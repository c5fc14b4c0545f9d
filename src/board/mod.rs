//! Board context: sections, tasks, work tracking, deadlines, search, and
//! comments.
//!
//! The board depends on the project context only through its
//! [`crate::project::ports::AccessControl`] port; project-side cascades
//! reach the board through [`adapters::RepositoryBoardGateway`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
