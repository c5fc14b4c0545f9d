//! Service layer for registration, login, and presence.

use crate::identity::{
    domain::{DisplayName, EmailAddress, IdentityDomainError, User, UserId, Username},
    ports::{
        CredentialStore, CredentialStoreError, UserRepository, UserRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    email: String,
    username: String,
    display_name: String,
    surname: String,
    secret: String,
}

impl RegisterAccountRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
        surname: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            display_name: display_name.into(),
            surname: surname.into(),
            secret: secret.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),

    /// Credential collaborator failed.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),

    /// The email/secret pair did not verify.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user was not found.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct AccountService<R, S, C>
where
    R: UserRepository,
    S: CredentialStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    credentials: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> AccountService<R, S, C>
where
    R: UserRepository,
    S: CredentialStore,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(repository: Arc<R>, credentials: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            credentials,
            clock,
        }
    }

    /// Registers a new account and stores its credential.
    ///
    /// Registration counts as the first active day; the streak starts at one.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] when validation fails, the email or handle is
    /// already taken, or either collaborator rejects the write.
    pub async fn register(&self, request: RegisterAccountRequest) -> AccountResult<User> {
        let email = EmailAddress::new(request.email)?;
        let username = Username::new(request.username)?;
        let display_name = DisplayName::new(request.display_name)?;
        let surname = DisplayName::new(request.surname)?;

        let user = User::register(email, username, display_name, surname, &*self.clock);
        self.repository.store(&user).await?;
        self.credentials
            .register(user.id(), user.email(), &request.secret)
            .await?;

        info!(user = %user.id(), username = %user.username(), "account registered");
        Ok(user)
    }

    /// Verifies credentials and applies the daily streak rule.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when the email/secret
    /// pair does not verify, or a repository/credential error when a
    /// collaborator fails.
    pub async fn login(&self, email: &str, secret: &str) -> AccountResult<User> {
        let address = EmailAddress::new(email)?;
        let Some(user_id) = self.credentials.verify(&address, secret).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UnknownUser(user_id))?;
        user.apply_login(&*self.clock);
        self.repository.update(&user).await?;

        info!(user = %user.id(), streak = user.streak(), "login recorded");
        Ok(user)
    }

    /// Refreshes a user's last-activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UnknownUser`] when the user does not exist.
    pub async fn record_activity(&self, user_id: UserId) -> AccountResult<()> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UnknownUser(user_id))?;
        user.record_activity(&*self.clock);
        self.repository.update(&user).await?;
        Ok(())
    }

    /// Returns whether the user was active within the presence window.
    ///
    /// Unknown users count as offline.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn is_online(&self, user_id: UserId) -> AccountResult<bool> {
        let user = self.repository.find_by_id(user_id).await?;
        Ok(user.is_some_and(|found| found.is_online(&*self.clock)))
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn find_user(&self, user_id: UserId) -> AccountResult<Option<User>> {
        Ok(self.repository.find_by_id(user_id).await?)
    }

    /// Returns all registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Repository`] when the lookup fails.
    pub async fn list_users(&self) -> AccountResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }
}
