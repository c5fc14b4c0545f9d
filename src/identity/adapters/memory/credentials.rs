//! In-memory credential store hashing secrets with SHA-256.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::identity::{
    domain::{EmailAddress, UserId},
    ports::{CredentialStore, CredentialStoreError, CredentialStoreResult},
};

/// Salted SHA-256 digest of a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CredentialRecord {
    user_id: UserId,
    salt: [u8; 16],
    digest: [u8; 32],
}

/// In-memory credential store keyed by email address.
///
/// Secrets are never retained; each entry holds a per-credential random salt
/// and the SHA-256 digest of salt plus secret.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    state: Arc<RwLock<HashMap<EmailAddress, CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty credential store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn digest_secret(salt: &[u8; 16], secret: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hasher.finalize().into()
}

fn lock_poisoned(err: impl std::fmt::Display) -> CredentialStoreError {
    CredentialStoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(
        &self,
        user_id: UserId,
        email: &EmailAddress,
        secret: &str,
    ) -> CredentialStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(email) {
            return Err(CredentialStoreError::AlreadyRegistered(email.clone()));
        }

        let salt: [u8; 16] = Uuid::new_v4().into_bytes();
        let digest = digest_secret(&salt, secret);
        state.insert(
            email.clone(),
            CredentialRecord {
                user_id,
                salt,
                digest,
            },
        );
        Ok(())
    }

    async fn verify(
        &self,
        email: &EmailAddress,
        secret: &str,
    ) -> CredentialStoreResult<Option<UserId>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let verified = state.get(email).and_then(|record| {
            (digest_secret(&record.salt, secret) == record.digest).then_some(record.user_id)
        });
        Ok(verified)
    }

    async fn revoke(&self, email: &EmailAddress) -> CredentialStoreResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.remove(email);
        Ok(())
    }
}
