//! User aggregate and validated account field types.

use super::{EmailAddress, IdentityDomainError, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for display names, matching the `VARCHAR(100)` column.
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Window after the last recorded activity during which a user counts as
/// online.
const PRESENCE_WINDOW_MINUTES: i64 = 5;

/// Validated, lowercase alphanumeric-plus-underscores account handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum accepted username length.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum accepted username length.
    pub const MAX_LENGTH: usize = 32;

    /// Creates a validated username.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::UsernameLength`] when the trimmed value
    /// is outside 3–32 characters, or [`IdentityDomainError::InvalidUsername`]
    /// when it contains characters outside `[a-z0-9_]`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.len() < Self::MIN_LENGTH || normalized.len() > Self::MAX_LENGTH {
            return Err(IdentityDomainError::UsernameLength(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !is_valid {
            return Err(IdentityDomainError::InvalidUsername(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty human-readable name (given name or surname).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] when the value is
    /// empty after trimming, or [`IdentityDomainError::DisplayNameTooLong`]
    /// when it exceeds 100 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyDisplayName);
        }
        if trimmed.len() > MAX_DISPLAY_NAME_LENGTH {
            return Err(IdentityDomainError::DisplayNameTooLong(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the display name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    username: Username,
    display_name: DisplayName,
    surname: DisplayName,
    streak: u32,
    last_active: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted account handle.
    pub username: Username,
    /// Persisted given name.
    pub display_name: DisplayName,
    /// Persisted surname.
    pub surname: DisplayName,
    /// Persisted streak counter.
    pub streak: u32,
    /// Persisted last-activity timestamp.
    pub last_active: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a freshly registered user.
    ///
    /// Registration counts as the first active day, so the streak starts
    /// at one.
    #[must_use]
    pub fn register(
        email: EmailAddress,
        username: Username,
        display_name: DisplayName,
        surname: DisplayName,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            email,
            username,
            display_name,
            surname,
            streak: 1,
            last_active: timestamp,
            created_at: timestamp,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            username: data.username,
            display_name: data.display_name,
            surname: data.surname,
            streak: data.streak,
            last_active: data.last_active,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the account handle.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the given name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Returns the surname.
    #[must_use]
    pub const fn surname(&self) -> &DisplayName {
        &self.surname
    }

    /// Returns the consecutive-day login streak.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    /// Returns the last-activity timestamp.
    #[must_use]
    pub const fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies the daily streak rule for a login at the current clock time.
    ///
    /// Logging in on the same calendar day leaves the streak unchanged, on
    /// the immediately following day increments it, and after a gap (or a
    /// backwards clock) resets it to zero. The last-activity timestamp is
    /// refreshed either way.
    pub fn apply_login(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        let elapsed_days = now
            .date_naive()
            .signed_duration_since(self.last_active.date_naive())
            .num_days();

        match elapsed_days {
            0 => {}
            1 => self.streak = self.streak.saturating_add(1),
            _ => self.streak = 0,
        }
        self.last_active = now;
    }

    /// Refreshes the last-activity timestamp without touching the streak.
    pub fn record_activity(&mut self, clock: &impl Clock) {
        self.last_active = clock.utc();
    }

    /// Returns whether the user was active within the presence window.
    #[must_use]
    pub fn is_online(&self, clock: &impl Clock) -> bool {
        let idle = clock.utc().signed_duration_since(self.last_active);
        idle < TimeDelta::minutes(PRESENCE_WINDOW_MINUTES)
    }
}
