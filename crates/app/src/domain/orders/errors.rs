//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{domain::orders::status::OrderStatus, gateway::GatewayError};

/// PostgreSQL `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";

/// PostgreSQL `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The order does not exist for this user.
    #[error("order not found")]
    NotFound,

    /// Orders cannot be placed from an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A required request field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The payment confirmation failed signature verification.
    #[error("invalid payment signature")]
    InvalidSignature,

    /// The status graph does not allow this change.
    #[error("order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The confirmation names a different remote order than the one stored.
    #[error("gateway order does not match this order")]
    GatewayOrderMismatch,

    /// A paid order was re-verified with different payment references.
    #[error("payment references do not match this paid order")]
    PaymentReferenceMismatch,

    /// A concurrent transaction touched the same rows; safe to retry.
    #[error("concurrent update, retry")]
    Conflict,

    #[error("payment gateway error")]
    Gateway(#[from] GatewayError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if error
            .as_database_error()
            .and_then(DatabaseError::code)
            .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED)
        {
            return Self::Conflict;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::UniqueViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
