//! Input for registering a user.

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// UUID to assign to the user row.
    pub uuid: UserUuid,

    /// Login email, unique across users.
    pub email: String,

    /// SHA-256 hex digest of the user's bearer token.
    pub token_hash: String,
}
