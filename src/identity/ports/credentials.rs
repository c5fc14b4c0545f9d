//! Port for the external authentication collaborator.
//!
//! The credential store owns secrets end to end; the domain only ever hands
//! over a secret at registration and asks for verification at login. A
//! verification miss deliberately does not distinguish an unknown email from
//! a wrong secret.

use crate::identity::domain::{EmailAddress, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for credential store operations.
pub type CredentialStoreResult<T> = Result<T, CredentialStoreError>;

/// Authentication collaborator contract.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Registers a secret for a user under the given email address.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::AlreadyRegistered`] when a credential
    /// exists for the email address.
    async fn register(
        &self,
        user_id: UserId,
        email: &EmailAddress,
        secret: &str,
    ) -> CredentialStoreResult<()>;

    /// Verifies a secret, returning the owning user on success.
    ///
    /// Returns `Ok(None)` when the email is unknown or the secret does not
    /// match.
    async fn verify(
        &self,
        email: &EmailAddress,
        secret: &str,
    ) -> CredentialStoreResult<Option<UserId>>;

    /// Removes the credential for an email address, if present.
    async fn revoke(&self, email: &EmailAddress) -> CredentialStoreResult<()>;
}

/// Errors returned by credential store implementations.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    /// A credential already exists for the email address.
    #[error("credential already registered for {0}")]
    AlreadyRegistered(EmailAddress),

    /// Collaborator-side failure.
    #[error("credential backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl CredentialStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
