//! Service orchestration tests for account registration and login.

use std::sync::Arc;

use crate::identity::{
    adapters::memory::{InMemoryCredentialStore, InMemoryUserRepository},
    ports::UserRepositoryError,
    services::{AccountError, AccountService, RegisterAccountRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = AccountService<InMemoryUserRepository, InMemoryCredentialStore, DefaultClock>;

#[fixture]
fn service() -> TestService {
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(DefaultClock),
    )
}

fn ada_request() -> RegisterAccountRequest {
    RegisterAccountRequest::new("ada@example.com", "ada", "Ada", "Lovelace", "s3cret")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_then_login_round_trips(service: TestService) {
    let registered = service
        .register(ada_request())
        .await
        .expect("registration should succeed");

    let logged_in = service
        .login("ada@example.com", "s3cret")
        .await
        .expect("login should succeed");

    assert_eq!(logged_in.id(), registered.id());
    // Same-day login keeps the registration streak.
    assert_eq!(logged_in.streak(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_with_wrong_secret_is_rejected(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("registration should succeed");

    let result = service.login("ada@example.com", "wrong").await;
    assert!(matches!(result, Err(AccountError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_with_unknown_email_is_rejected(service: TestService) {
    let result = service.login("nobody@example.com", "s3cret").await;
    assert!(matches!(result, Err(AccountError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("first registration should succeed");

    let duplicate = RegisterAccountRequest::new(
        "ada@example.com",
        "ada2",
        "Ada",
        "Byron",
        "other",
    );
    let result = service.register(duplicate).await;
    assert!(matches!(
        result,
        Err(AccountError::Repository(
            UserRepositoryError::DuplicateEmail(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_rejected(service: TestService) {
    service
        .register(ada_request())
        .await
        .expect("first registration should succeed");

    let duplicate =
        RegisterAccountRequest::new("other@example.com", "ada", "Ada", "Byron", "other");
    let result = service.register(duplicate).await;
    assert!(matches!(
        result,
        Err(AccountError::Repository(
            UserRepositoryError::DuplicateUsername(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_activity_marks_user_online(service: TestService) {
    let registered = service
        .register(ada_request())
        .await
        .expect("registration should succeed");

    service
        .record_activity(registered.id())
        .await
        .expect("activity should be recorded");

    assert!(service
        .is_online(registered.id())
        .await
        .expect("presence lookup should succeed"));
}
