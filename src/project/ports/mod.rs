//! Port contracts for projects, memberships, and roles.
//!
//! Besides the repository ports, this module defines two collaborator
//! contracts that cross context boundaries: [`AccessControl`], consumed by
//! the board services for permission checks, and [`BoardGateway`], through
//! which project-side cascades (deletion, member removal, role deletion)
//! reach the board without depending on its repositories directly.

pub mod access;
pub mod board;
pub mod membership;
pub mod repository;
pub mod roles;

pub use access::{AccessControl, AccessError, AccessResult};
pub use board::{BoardGateway, BoardGatewayError, BoardGatewayResult};
pub use membership::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult};
pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use roles::{RoleRepository, RoleRepositoryError, RoleRepositoryResult};
