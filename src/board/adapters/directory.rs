//! User directory backed by the identity context's user repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::board::ports::{UserCard, UserDirectory, UserDirectoryError, UserDirectoryResult};
use crate::identity::{domain::UserId, ports::UserRepository};

/// Resolves name cards through the identity user repository.
pub struct RepositoryUserDirectory<R>
where
    R: UserRepository,
{
    users: Arc<R>,
}

impl<R> RepositoryUserDirectory<R>
where
    R: UserRepository,
{
    /// Creates a new directory over the user repository.
    #[must_use]
    pub const fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserDirectory for RepositoryUserDirectory<R>
where
    R: UserRepository,
{
    async fn cards_for(
        &self,
        user_ids: &[UserId],
    ) -> UserDirectoryResult<HashMap<UserId, UserCard>> {
        let mut cards = HashMap::with_capacity(user_ids.len());
        for user_id in user_ids {
            let Some(user) = self
                .users
                .find_by_id(*user_id)
                .await
                .map_err(UserDirectoryError::backend)?
            else {
                continue;
            };
            cards.insert(
                *user_id,
                UserCard {
                    user_id: *user_id,
                    display_name: user.display_name().as_str().to_owned(),
                    username: user.username().as_str().to_owned(),
                },
            );
        }
        Ok(cards)
    }
}
