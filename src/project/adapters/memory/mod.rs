//! In-memory project adapters for session-scoped use and tests.

mod membership;
mod project;
mod role;

pub use membership::InMemoryMembershipRepository;
pub use project::InMemoryProjectRepository;
pub use role::InMemoryRoleRepository;
