//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::users::{
    data::NewUser,
    errors::UsersServiceError,
    records::{UserRecord, UserUuid},
    repository::PgUsersRepository,
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.email.trim().is_empty() {
            return Err(UsersServiceError::InvalidData);
        }

        let created = self.repository.create_user(user).await?;

        tracing::info!(user_uuid = %created.uuid, "created user");

        Ok(created)
    }

    async fn set_active(
        &self,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let updated = self.repository.set_active(user, is_active).await?;

        tracing::info!(user_uuid = %updated.uuid, is_active, "updated user activity");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user with a pre-hashed bearer token.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Activate or deactivate a user.
    async fn set_active(
        &self,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{auth::hash_api_token, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_user_returns_active_user() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = UserUuid::new();

        let user = ctx
            .users
            .create_user(NewUser {
                uuid,
                email: "buyer@example.com".to_string(),
                token_hash: hash_api_token("sf_buyer"),
            })
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.email, "buyer@example.com");
        assert!(user.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "twice@example.com".to_string(),
                token_hash: hash_api_token("sf_first"),
            })
            .await?;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "twice@example.com".to_string(),
                token_hash: hash_api_token("sf_second"),
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_blank_email_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: "   ".to_string(),
                token_hash: hash_api_token("sf_blank"),
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_active_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.set_active(UserUuid::new(), false).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
