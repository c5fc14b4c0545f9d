//! Validated hex display color.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback color used when a section reference cannot be resolved.
pub const FALLBACK_SECTION_COLOR: &str = "#6366f1";

/// Lowercased `#rrggbb` display color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parses a `#rrggbb` hex color, lowercasing the digits.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidHexColor`] when the value is not
    /// a `#` followed by exactly six hex digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(BoardDomainError::InvalidHexColor(raw));
        };
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BoardDomainError::InvalidHexColor(raw));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the fallback section color.
    #[must_use]
    pub fn fallback() -> Self {
        Self(FALLBACK_SECTION_COLOR.to_owned())
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
