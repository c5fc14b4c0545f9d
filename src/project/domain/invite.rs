//! Invite code token for self-service project joining.

use super::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of generated invite codes.
const GENERATED_LENGTH: usize = 8;

/// Accepted invite code length range.
const MIN_LENGTH: usize = 4;
const MAX_LENGTH: usize = 16;

/// Short shareable token that lets a user join a project as a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generates a fresh random invite code.
    #[must_use]
    pub fn generate() -> Self {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(GENERATED_LENGTH)
            .collect();
        Self(token)
    }

    /// Parses an invite code supplied by a joining user.
    ///
    /// The input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidInviteCode`] when the value is
    /// outside 4–16 characters or contains characters outside `[a-z0-9]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        let length_ok = (MIN_LENGTH..=MAX_LENGTH).contains(&normalized.len());
        let charset_ok = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

        if !length_ok || !charset_ok {
            return Err(ProjectDomainError::InvalidInviteCode(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the invite code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InviteCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
