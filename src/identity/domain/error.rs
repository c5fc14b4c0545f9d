//! Error types for identity domain validation.

use super::Username;
use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is not structurally valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The username contains characters outside `[a-z0-9_]`.
    #[error("invalid username '{0}', expected lowercase letters, digits, or underscores")]
    InvalidUsername(String),

    /// The username is shorter or longer than the accepted range.
    #[error(
        "username '{0}' must be between {min} and {max} characters",
        min = Username::MIN_LENGTH,
        max = Username::MAX_LENGTH
    )]
    UsernameLength(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds the persisted column width.
    #[error("display name too long: {0}")]
    DisplayNameTooLong(String),
}
