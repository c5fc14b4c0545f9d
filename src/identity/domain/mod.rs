//! Domain model for user accounts.
//!
//! Accounts carry validated identity fields plus the login streak state. All
//! time-dependent rules take an injected clock so streak and presence logic
//! stay deterministic under test.

mod email;
mod error;
mod ids;
mod user;

pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use ids::UserId;
pub use user::{DisplayName, PersistedUserData, User, Username};
