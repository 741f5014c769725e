//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Local order not found."),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty."),
        OrdersServiceError::MissingField(field) => {
            StatusError::bad_request().brief(format!("Required field missing: {field}"))
        }
        OrdersServiceError::InvalidSignature => {
            StatusError::bad_request().brief("Invalid payment signature.")
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Order cannot move from {from} to {to}."))
        }
        OrdersServiceError::GatewayOrderMismatch => {
            StatusError::conflict().brief("Gateway order does not match this order.")
        }
        OrdersServiceError::PaymentReferenceMismatch => {
            StatusError::conflict().brief("Payment references do not match this paid order.")
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was updated concurrently, retry.")
        }
        OrdersServiceError::Gateway(source) => {
            warn!("payment gateway error: {source}");

            StatusError::bad_gateway().brief("Payment gateway error.")
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload.")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Metric label for a failed order operation.
pub(crate) fn outcome_label(error: &OrdersServiceError) -> &'static str {
    match error {
        OrdersServiceError::NotFound => "not_found",
        OrdersServiceError::EmptyCart => "empty_cart",
        OrdersServiceError::MissingField(_) => "missing_field",
        OrdersServiceError::InvalidSignature => "invalid_signature",
        OrdersServiceError::InvalidTransition { .. }
        | OrdersServiceError::GatewayOrderMismatch
        | OrdersServiceError::PaymentReferenceMismatch => "invalid_state",
        OrdersServiceError::Conflict => "conflict",
        OrdersServiceError::Gateway(_) => "gateway_error",
        OrdersServiceError::InvalidReference
        | OrdersServiceError::InvalidData
        | OrdersServiceError::Sql(_) => "error",
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::{domain::orders::status::OrderStatus, gateway::GatewayError};

    use super::*;

    fn status(error: OrdersServiceError) -> StatusCode {
        into_status_error(error).code
    }

    #[test]
    fn validation_failures_are_bad_requests() {
        assert_eq!(status(OrdersServiceError::EmptyCart), StatusCode::BAD_REQUEST);
        assert_eq!(status(OrdersServiceError::MissingField("signature")), StatusCode::BAD_REQUEST);
        assert_eq!(status(OrdersServiceError::InvalidSignature), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn state_conflicts_are_409() {
        assert_eq!(
            status(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Failed,
                to: OrderStatus::Paid,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(status(OrdersServiceError::GatewayOrderMismatch), StatusCode::CONFLICT);
        assert_eq!(status(OrdersServiceError::Conflict), StatusCode::CONFLICT);
    }

    #[test]
    fn gateway_failures_are_502() {
        assert_eq!(
            status(OrdersServiceError::Gateway(GatewayError::Timeout)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn outcome_labels_group_state_errors() {
        assert_eq!(outcome_label(&OrdersServiceError::PaymentReferenceMismatch), "invalid_state");
        assert_eq!(
            outcome_label(&OrdersServiceError::Gateway(GatewayError::InvalidAmount)),
            "gateway_error"
        );
    }
}
