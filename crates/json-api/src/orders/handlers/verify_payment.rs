//! Verify Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{data::PaymentVerification, records::VerificationOutcome};

use crate::{
    extensions::*,
    observability::observe_payment_verification,
    orders::errors::{into_status_error, outcome_label},
    state::State,
};

/// Verify Payment Request
///
/// Fields are optional so that a missing one is reported by name.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentRequest {
    pub order_id: Option<Uuid>,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub signature: Option<String>,
}

/// Verify Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentResponse {
    pub detail: String,
    pub order_id: Uuid,
    pub status: String,
}

/// Verify Payment Handler
///
/// Confirms a client-reported payment and marks the order paid. Repeating a
/// successful confirmation is accepted without changing anything.
#[endpoint(
    tags("orders"),
    summary = "Verify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing field or invalid signature"),
        (status_code = StatusCode::NOT_FOUND, description = "Local order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is not payable with these references"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.verify_payment",
    skip(depot, json),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    json: JsonBody<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let request = json.into_inner();

    let verified = match PaymentVerification::from_parts(
        request.order_id.map(Into::into),
        request.gateway_order_id,
        request.gateway_payment_id,
        request.signature,
    ) {
        Ok(verification) => {
            span.record("order_uuid", tracing::field::display(verification.order));

            state.app.orders.verify_payment(user, verification).await
        }
        Err(error) => Err(error),
    };

    let verified = match verified {
        Ok(verified) => verified,
        Err(error) => {
            observe_payment_verification(outcome_label(&error));

            return Err(into_status_error(error));
        }
    };

    let detail = match verified.outcome {
        VerificationOutcome::Paid => {
            observe_payment_verification("paid");

            "Payment verified successfully."
        }
        VerificationOutcome::AlreadyPaid => {
            observe_payment_verification("already_paid");

            "Payment already verified."
        }
    };

    Ok(Json(VerifyPaymentResponse {
        detail: detail.to_string(),
        order_id: verified.order.uuid.into(),
        status: verified.order.status.as_str().to_string(),
    }))
}
