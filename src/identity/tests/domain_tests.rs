//! Unit tests for identity domain validation, streaks, and presence.

use crate::identity::domain::{
    DisplayName, EmailAddress, IdentityDomainError, PersistedUserData, User, UserId, Username,
};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::rstest;

fn sample_user(last_active_offset: TimeDelta, streak: u32) -> User {
    let now = Utc::now();
    User::from_persisted(PersistedUserData {
        id: UserId::new(),
        email: EmailAddress::new("ada@example.com").expect("valid email"),
        username: Username::new("ada").expect("valid username"),
        display_name: DisplayName::new("Ada").expect("valid name"),
        surname: DisplayName::new("Lovelace").expect("valid name"),
        streak,
        last_active: now - last_active_offset,
        created_at: now - TimeDelta::days(30),
    })
}

#[rstest]
#[case("Ada@Example.COM", "ada@example.com")]
#[case("  bob@mail.example.org  ", "bob@mail.example.org")]
fn email_is_trimmed_and_lowercased(#[case] input: &str, #[case] expected: &str) {
    let email = EmailAddress::new(input).expect("valid email");
    assert_eq!(email.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("plain")]
#[case("two@@example.com")]
#[case("@example.com")]
#[case("user@")]
#[case("user@nodot")]
#[case("user name@example.com")]
fn malformed_emails_are_rejected(#[case] input: &str) {
    assert!(matches!(
        EmailAddress::new(input),
        Err(IdentityDomainError::InvalidEmail(_))
    ));
}

#[rstest]
#[case("Ada_99", "ada_99")]
#[case("  kit  ", "kit")]
fn usernames_are_normalized(#[case] input: &str, #[case] expected: &str) {
    let username = Username::new(input).expect("valid username");
    assert_eq!(username.as_str(), expected);
}

#[rstest]
fn username_outside_length_range_is_rejected() {
    assert!(matches!(
        Username::new("ab"),
        Err(IdentityDomainError::UsernameLength(_))
    ));
    let long = "a".repeat(33);
    assert!(matches!(
        Username::new(long),
        Err(IdentityDomainError::UsernameLength(_))
    ));
}

#[rstest]
fn username_with_forbidden_characters_is_rejected() {
    assert!(matches!(
        Username::new("ada lovelace"),
        Err(IdentityDomainError::InvalidUsername(_))
    ));
}

#[rstest]
fn display_name_must_not_be_blank() {
    assert_eq!(
        DisplayName::new("   "),
        Err(IdentityDomainError::EmptyDisplayName)
    );
}

#[rstest]
fn registration_starts_streak_at_one() {
    let user = User::register(
        EmailAddress::new("ada@example.com").expect("valid email"),
        Username::new("ada").expect("valid username"),
        DisplayName::new("Ada").expect("valid name"),
        DisplayName::new("Lovelace").expect("valid name"),
        &DefaultClock,
    );
    assert_eq!(user.streak(), 1);
    assert_eq!(user.last_active(), user.created_at());
}

#[rstest]
fn login_on_the_same_day_keeps_streak() {
    let mut user = sample_user(TimeDelta::minutes(30), 4);
    user.apply_login(&DefaultClock);
    assert_eq!(user.streak(), 4);
}

#[rstest]
fn login_on_the_next_day_increments_streak() {
    let mut user = sample_user(TimeDelta::days(1), 4);
    user.apply_login(&DefaultClock);
    assert_eq!(user.streak(), 5);
}

#[rstest]
#[case(TimeDelta::days(2))]
#[case(TimeDelta::days(14))]
fn login_after_a_gap_resets_streak(#[case] gap: TimeDelta) {
    let mut user = sample_user(gap, 9);
    user.apply_login(&DefaultClock);
    assert_eq!(user.streak(), 0);
}

#[rstest]
fn login_refreshes_last_active() {
    let mut user = sample_user(TimeDelta::days(3), 2);
    let previous = user.last_active();
    user.apply_login(&DefaultClock);
    assert!(user.last_active() > previous);
}

#[rstest]
fn recent_activity_counts_as_online() {
    let user = sample_user(TimeDelta::minutes(2), 1);
    assert!(user.is_online(&DefaultClock));
}

#[rstest]
fn stale_activity_counts_as_offline() {
    let user = sample_user(TimeDelta::minutes(10), 1);
    assert!(!user.is_online(&DefaultClock));
}
