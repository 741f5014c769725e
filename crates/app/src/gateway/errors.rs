//! Payment gateway errors.

use thiserror::Error;

/// Errors raised while talking to the payment provider.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport or body decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("gateway rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The provider answered 2xx with a body we could not use.
    #[error("unexpected response from gateway: {0}")]
    UnexpectedResponse(String),

    /// The amount cannot be expressed in minor units.
    #[error("amount cannot be converted to minor units")]
    InvalidAmount,

    /// No answer within the configured timeout.
    #[error("gateway call timed out")]
    Timeout,
}
