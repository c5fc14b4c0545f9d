//! Application services for projects, roles, and access control.

mod access;
mod projects;
mod roles;

pub use access::AccessEvaluator;
pub use projects::{ProjectError, ProjectResult, ProjectService, ProjectSummary};
pub use roles::{CreateRoleRequest, RoleError, RoleResult, RoleService};
