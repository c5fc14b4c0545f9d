//! In-memory identity adapters for session-scoped use and tests.

mod credentials;
mod user;

pub use credentials::InMemoryCredentialStore;
pub use user::InMemoryUserRepository;
