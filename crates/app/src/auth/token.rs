//! API token generation, parsing, and hashing.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// Raw token handed out once, together with the digest that gets stored.
#[derive(Debug)]
pub struct IssuedApiToken {
    pub token: Zeroizing<String>,
    pub token_hash: String,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_api_token(secret: &ApiTokenSecret) -> String {
    format!("{API_TOKEN_PREFIX}_{}", hex::encode(secret.as_bytes()))
}

pub fn parse_api_token(token: &str) -> Result<ApiTokenSecret, ApiTokenError> {
    let (prefix, secret_hex) = token.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX || secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return Err(ApiTokenError::InvalidFormat);
    }

    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    hex::decode_to_slice(secret_hex, &mut secret)
        .map_err(|_| ApiTokenError::InvalidSecretEncoding)?;

    Ok(ApiTokenSecret::from_bytes(secret))
}

/// SHA-256 hex digest stored in `users.token_hash`.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Generate a fresh token and its stored digest.
#[must_use]
pub fn issue_api_token() -> IssuedApiToken {
    let token = Zeroizing::new(format_api_token(&generate_api_token_secret()));
    let token_hash = hash_api_token(&token);

    IssuedApiToken { token, token_hash }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn issued_tokens_parse_and_hash_consistently() -> TestResult {
        let issued = issue_api_token();

        parse_api_token(&issued.token)?;

        assert!(issued.token.starts_with("sf_"));
        assert_eq!(issued.token.len(), 3 + API_TOKEN_SECRET_HEX_CHARS);
        assert_eq!(hash_api_token(&issued.token), issued.token_hash);

        Ok(())
    }

    #[test]
    fn issued_tokens_are_unique() {
        let first = issue_api_token();
        let second = issue_api_token();

        assert_ne!(*first.token, *second.token);
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("xx_{}", "ab".repeat(API_TOKEN_SECRET_BYTES));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_non_hex_secret() {
        let token = format!("sf_{}", "zz".repeat(API_TOKEN_SECRET_BYTES));

        assert!(matches!(
            parse_api_token(&token),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn hash_is_lowercase_sha256_hex() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
