//! Port contracts for user accounts.
//!
//! Ports define infrastructure-agnostic interfaces used by account services.

pub mod credentials;
pub mod repository;

pub use credentials::{CredentialStore, CredentialStoreError, CredentialStoreResult};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
