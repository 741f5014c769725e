//! Payment gateway request and response shapes.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde_json::Value;

use crate::gateway::GatewayError;

/// Currency every order is charged in.
pub const CURRENCY: &str = "INR";

/// Request to open a remote order for a local one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrderRequest {
    /// Amount in the currency's smallest unit (paise).
    pub amount_minor: u64,
    pub currency: String,

    /// Free-form metadata echoed back by the provider.
    pub notes: BTreeMap<String, String>,
}

/// Remote order as created by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOrder {
    pub id: String,

    /// Untouched provider response body.
    pub raw: Value,
}

/// Client-reported payment confirmation to be checked against the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

/// Convert a decimal amount to minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidAmount`] for negative amounts and amounts
/// that do not fit in a `u64`.
pub fn to_minor_units(amount: Decimal) -> Result<u64, GatewayError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_u64())
        .ok_or(GatewayError::InvalidAmount)
}
