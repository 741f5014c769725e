//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// No user holds the presented token, or the token is malformed.
    #[error("token not found")]
    NotFound,

    /// The token belongs to a deactivated user.
    #[error("user is inactive")]
    Inactive,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
