//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{AuthServiceError, hash_api_token, parse_api_token},
    domain::users::{records::UserUuid, repository::PgUsersRepository},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgUsersRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let user = self
            .repository
            .find_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if !user.is_active {
            return Err(AuthServiceError::Inactive);
        }

        Ok(user.uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
