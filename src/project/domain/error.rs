//! Error types for project domain validation.

use super::RoleName;
use thiserror::Error;

/// Errors returned while constructing or mutating project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the persisted column width.
    #[error("project name too long: {0}")]
    ProjectNameTooLong(String),

    /// The role name is empty after trimming.
    #[error("role name must not be empty")]
    EmptyRoleName,

    /// The role name exceeds the persisted column width.
    #[error("role name too long: {0}")]
    RoleNameTooLong(String),

    /// The invite code does not match the accepted token shape.
    #[error("invalid invite code: {0}")]
    InvalidInviteCode(String),

    /// The `Owner` role is synthetic and cannot be edited or deleted.
    #[error("role '{0}' is protected")]
    ProtectedRole(RoleName),

    /// A membership must always carry at least one role.
    #[error("membership must carry at least one role")]
    EmptyMembership,
}
