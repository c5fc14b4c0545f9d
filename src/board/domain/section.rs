//! Board section aggregate and its name and allowlist rules.

use super::{BoardDomainError, HexColor, SectionId};
use crate::project::domain::{ProjectId, RoleName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a section name, matching the `VARCHAR(100)` column.
const MAX_SECTION_NAME_LENGTH: usize = 100;

/// Trimmed, non-empty section name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionName(String);

impl SectionName {
    /// Creates a validated section name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptySectionName`] when the value is
    /// empty after trimming, or [`BoardDomainError::SectionNameTooLong`]
    /// when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptySectionName);
        }
        if trimmed.len() > MAX_SECTION_NAME_LENGTH {
            return Err(BoardDomainError::SectionNameTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the section name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named, colored column grouping tasks within a project.
///
/// The `allowed_roles` allowlist controls who may edit tasks inside the
/// section; `Owner` is always implicitly allowed. An empty allowlist at
/// creation defaults to `["Owner"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    project_id: ProjectId,
    name: SectionName,
    color: HexColor,
    position: u32,
    allowed_roles: Vec<RoleName>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSectionData {
    /// Persisted section identifier.
    pub id: SectionId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted section name.
    pub name: SectionName,
    /// Persisted display color.
    pub color: HexColor,
    /// Persisted board position.
    pub position: u32,
    /// Persisted role allowlist.
    pub allowed_roles: Vec<RoleName>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Section {
    /// Creates a new section at the given board position.
    ///
    /// An empty allowlist defaults to `["Owner"]`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: SectionName,
        color: HexColor,
        position: u32,
        allowed_roles: Vec<RoleName>,
        clock: &impl Clock,
    ) -> Self {
        let allowed = if allowed_roles.is_empty() {
            vec![RoleName::owner()]
        } else {
            allowed_roles
        };
        Self {
            id: SectionId::new(),
            project_id,
            name,
            color,
            position,
            allowed_roles: allowed,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a section from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSectionData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            color: data.color,
            position: data.position,
            allowed_roles: data.allowed_roles,
            created_at: data.created_at,
        }
    }

    /// Returns the section identifier.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the section name.
    #[must_use]
    pub const fn name(&self) -> &SectionName {
        &self.name
    }

    /// Returns the display color.
    #[must_use]
    pub const fn color(&self) -> &HexColor {
        &self.color
    }

    /// Returns the board position.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the role allowlist.
    #[must_use]
    pub fn allowed_roles(&self) -> &[RoleName] {
        &self.allowed_roles
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the section.
    pub fn rename(&mut self, name: SectionName) {
        self.name = name;
    }

    /// Changes the display color.
    pub fn recolor(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Replaces the role allowlist.
    pub fn set_allowed_roles(&mut self, allowed_roles: Vec<RoleName>) {
        self.allowed_roles = allowed_roles;
    }

    /// Removes a deleted role's name from the allowlist.
    ///
    /// Returns whether the allowlist changed.
    pub fn strip_role(&mut self, role: &RoleName) -> bool {
        let before = self.allowed_roles.len();
        self.allowed_roles.retain(|held| held != role);
        self.allowed_roles.len() != before
    }
}
