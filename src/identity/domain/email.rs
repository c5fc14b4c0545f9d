//! Validated email address type.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length accepted for an email address, matching the column width.
const MAX_EMAIL_LENGTH: usize = 254;

/// Validated, lowercased email address.
///
/// Validation is structural only (one `@`, non-empty local part, dotted
/// domain); deliverability is the credential collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// The input is trimmed and lowercased before validation.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the value is empty,
    /// exceeds 254 characters, or does not have the shape
    /// `local@domain.tld`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() || normalized.len() > MAX_EMAIL_LENGTH {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_parts
            && domain.contains('.')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
