//! Validated name types for projects and roles.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(200)` column.
const MAX_PROJECT_NAME_LENGTH: usize = 200;

/// Maximum length for a role name, matching the `VARCHAR(100)` column.
const MAX_ROLE_NAME_LENGTH: usize = 100;

/// Trimmed, non-empty project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the value is
    /// empty after trimming, or [`ProjectDomainError::ProjectNameTooLong`]
    /// when it exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        if trimmed.len() > MAX_PROJECT_NAME_LENGTH {
            return Err(ProjectDomainError::ProjectNameTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the project name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty role name.
///
/// Role names are referenced by value from memberships and section
/// allowlists; comparisons are case-sensitive except for the duplicate check
/// at role creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyRoleName`] when the value is empty
    /// after trimming, or [`ProjectDomainError::RoleNameTooLong`] when it
    /// exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyRoleName);
        }
        if trimmed.len() > MAX_ROLE_NAME_LENGTH {
            return Err(ProjectDomainError::RoleNameTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the protected owner role name.
    #[must_use]
    pub fn owner() -> Self {
        Self("Owner".to_owned())
    }

    /// Returns the fallback member role name.
    #[must_use]
    pub fn member() -> Self {
        Self("Member".to_owned())
    }

    /// Returns whether this is the protected owner role name.
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.0 == "Owner"
    }

    /// Returns whether this name equals another, ignoring ASCII case.
    ///
    /// Used for the duplicate check at role creation.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Returns the role name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
