//! Domain model for projects, memberships, and roles.
//!
//! Permission evaluation is pure: given a project, a member's role names,
//! and the project's role definitions, the effective permission set is
//! computed without touching infrastructure.

mod access;
mod error;
mod ids;
mod invite;
mod membership;
mod names;
mod permissions;
mod project;
mod role;

pub use access::{can_edit_section, evaluate_permissions};
pub use error::ProjectDomainError;
pub use ids::{ProjectId, RoleId};
pub use invite::InviteCode;
pub use membership::Membership;
pub use names::{ProjectName, RoleName};
pub use permissions::{Permission, RolePermissions};
pub use project::{PersistedProjectData, Project};
pub use role::{PersistedRoleData, ProjectRole, ROLE_PALETTE, palette_color};
