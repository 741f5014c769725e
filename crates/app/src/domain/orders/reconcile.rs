//! Payment reconciliation decisions.
//!
//! [`reconcile`] decides what a payment confirmation does to a locked order
//! row. It performs no I/O; the orders service applies the decision inside
//! the same transaction that locked the row.

use crate::{
    domain::orders::{errors::OrdersServiceError, records::OrderRecord, status::OrderStatus},
    gateway::PaymentConfirmation,
};

/// Write to perform for a confirmation against an existing order.
#[derive(Debug, Clone)]
pub enum Reconciliation {
    /// Move to `PAID`, store the references and clear the matching cart lines.
    MarkPaid(OrderRecord),

    /// Move to `FAILED` and store the references, then report an invalid signature.
    MarkFailed(OrderRecord),

    /// Already `PAID` with identical references; nothing to write.
    AlreadyPaid(OrderRecord),
}

/// Decide the outcome of a confirmation.
///
/// # Errors
///
/// Returns the error to report when the confirmation must not write anything:
/// [`OrdersServiceError::InvalidSignature`] for a bad signature against a
/// missing or terminal order, [`OrdersServiceError::NotFound`] for a valid
/// signature against a missing order, or a state error when a valid
/// confirmation contradicts the stored order.
pub fn reconcile(
    order: Option<OrderRecord>,
    confirmation: &PaymentConfirmation,
    signature_valid: bool,
) -> Result<Reconciliation, OrdersServiceError> {
    let Some(order) = order else {
        return Err(if signature_valid {
            OrdersServiceError::NotFound
        } else {
            OrdersServiceError::InvalidSignature
        });
    };

    if !signature_valid {
        return if order.status.can_transition_to(OrderStatus::Failed) {
            Ok(Reconciliation::MarkFailed(order))
        } else {
            Err(OrdersServiceError::InvalidSignature)
        };
    }

    match order.status {
        OrderStatus::Pending => {
            let stored_elsewhere = order
                .gateway_order_id
                .as_deref()
                .is_some_and(|stored| stored != confirmation.gateway_order_id);

            if stored_elsewhere {
                Err(OrdersServiceError::GatewayOrderMismatch)
            } else {
                Ok(Reconciliation::MarkPaid(order))
            }
        }
        OrderStatus::Paid if order.matches_confirmation(confirmation) => {
            Ok(Reconciliation::AlreadyPaid(order))
        }
        OrderStatus::Paid => Err(OrdersServiceError::PaymentReferenceMismatch),
        from @ (OrderStatus::Failed | OrderStatus::Cancelled) => {
            Err(OrdersServiceError::InvalidTransition {
                from,
                to: OrderStatus::Paid,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::domain::{orders::records::OrderUuid, users::records::UserUuid};

    use super::*;

    fn confirmation() -> PaymentConfirmation {
        PaymentConfirmation {
            gateway_order_id: "order_A".to_string(),
            gateway_payment_id: "pay_A".to_string(),
            signature: "sig_A".to_string(),
        }
    }

    fn order(status: OrderStatus, gateway_order_id: Option<&str>) -> OrderRecord {
        OrderRecord {
            uuid: OrderUuid::new(),
            user: UserUuid::new(),
            total_amount: Decimal::new(2500, 2),
            status,
            gateway_order_id: gateway_order_id.map(str::to_string),
            gateway_payment_id: None,
            gateway_signature: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn paid(payment_id: &str, signature: &str) -> OrderRecord {
        OrderRecord {
            gateway_payment_id: Some(payment_id.to_string()),
            gateway_signature: Some(signature.to_string()),
            ..order(OrderStatus::Paid, Some("order_A"))
        }
    }

    #[test]
    fn invalid_signature_without_order_writes_nothing() {
        let result = reconcile(None, &confirmation(), false);

        assert!(matches!(result, Err(OrdersServiceError::InvalidSignature)));
    }

    #[test]
    fn invalid_signature_on_pending_order_marks_failed() {
        let result = reconcile(
            Some(order(OrderStatus::Pending, Some("order_A"))),
            &confirmation(),
            false,
        );

        assert!(matches!(result, Ok(Reconciliation::MarkFailed(_))));
    }

    #[test]
    fn invalid_signature_on_terminal_order_writes_nothing() {
        for status in [OrderStatus::Paid, OrderStatus::Failed, OrderStatus::Cancelled] {
            let result = reconcile(Some(order(status, Some("order_A"))), &confirmation(), false);

            assert!(
                matches!(result, Err(OrdersServiceError::InvalidSignature)),
                "{status}: expected InvalidSignature, got {result:?}"
            );
        }
    }

    #[test]
    fn valid_signature_without_order_is_not_found() {
        let result = reconcile(None, &confirmation(), true);

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[test]
    fn valid_signature_on_pending_order_marks_paid() {
        let result = reconcile(
            Some(order(OrderStatus::Pending, Some("order_A"))),
            &confirmation(),
            true,
        );

        assert!(matches!(result, Ok(Reconciliation::MarkPaid(_))));
    }

    #[test]
    fn valid_signature_on_pending_order_without_remote_id_marks_paid() {
        let result = reconcile(Some(order(OrderStatus::Pending, None)), &confirmation(), true);

        assert!(matches!(result, Ok(Reconciliation::MarkPaid(_))));
    }

    #[test]
    fn valid_signature_for_other_remote_order_is_mismatch() {
        let result = reconcile(
            Some(order(OrderStatus::Pending, Some("order_B"))),
            &confirmation(),
            true,
        );

        assert!(matches!(result, Err(OrdersServiceError::GatewayOrderMismatch)));
    }

    #[test]
    fn repeat_verification_of_paid_order_is_noop() {
        let result = reconcile(Some(paid("pay_A", "sig_A")), &confirmation(), true);

        assert!(matches!(result, Ok(Reconciliation::AlreadyPaid(_))));
    }

    #[test]
    fn paid_order_with_other_payment_is_mismatch() {
        let result = reconcile(Some(paid("pay_B", "sig_A")), &confirmation(), true);

        assert!(matches!(
            result,
            Err(OrdersServiceError::PaymentReferenceMismatch)
        ));
    }

    #[test]
    fn paid_order_with_other_signature_is_mismatch() {
        let result = reconcile(Some(paid("pay_A", "sig_B")), &confirmation(), true);

        assert!(matches!(
            result,
            Err(OrdersServiceError::PaymentReferenceMismatch)
        ));
    }

    #[test]
    fn failed_order_cannot_be_paid() {
        let result = reconcile(
            Some(order(OrderStatus::Failed, Some("order_A"))),
            &confirmation(),
            true,
        );

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Failed,
                to: OrderStatus::Paid
            })
        ));
    }

    #[test]
    fn cancelled_order_cannot_be_paid() {
        let result = reconcile(
            Some(order(OrderStatus::Cancelled, None)),
            &confirmation(),
            true,
        );

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidTransition {
                from: OrderStatus::Cancelled,
                ..
            })
        ));
    }
}
