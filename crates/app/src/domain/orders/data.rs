//! Input for reconciling a client-reported payment against a local order.

use crate::{
    domain::orders::{errors::OrdersServiceError, records::OrderUuid},
    gateway::PaymentConfirmation,
};

/// Payment confirmation for a local order, as reported by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentVerification {
    pub order: OrderUuid,
    pub confirmation: PaymentConfirmation,
}

impl PaymentVerification {
    /// Build a verification request from optional fields.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::MissingField`] naming the first field that
    /// is absent or blank.
    pub fn from_parts(
        order: Option<OrderUuid>,
        gateway_order_id: Option<String>,
        gateway_payment_id: Option<String>,
        signature: Option<String>,
    ) -> Result<Self, OrdersServiceError> {
        let gateway_order_id = required("gateway_order_id", gateway_order_id)?;
        let gateway_payment_id = required("gateway_payment_id", gateway_payment_id)?;
        let signature = required("signature", signature)?;
        let order = order.ok_or(OrdersServiceError::MissingField("order_id"))?;

        Ok(Self {
            order,
            confirmation: PaymentConfirmation {
                gateway_order_id,
                gateway_payment_id,
                signature,
            },
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, OrdersServiceError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(OrdersServiceError::MissingField(field))
}
