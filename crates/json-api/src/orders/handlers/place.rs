//! Place Order Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::observe_order_placed,
    orders::errors::{into_status_error, outcome_label},
    responses::format_amount,
    state::State,
};

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    pub detail: String,
    pub order_id: Uuid,
    pub total_amount: String,

    /// Remote order the client pays against
    pub gateway_order_id: String,
    pub currency: String,

    /// Provider response, passed through for the client checkout widget
    pub gateway_raw_response: Value,
}

/// Place Order Handler
///
/// Snapshots the cart into a pending order and opens a remote payment order.
/// The cart is kept until the payment is verified.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent update, retry"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway error"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.place",
    skip(depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let placed = match state.app.orders.place_order(user).await {
        Ok(placed) => placed,
        Err(error) => {
            observe_order_placed(outcome_label(&error));

            return Err(into_status_error(error));
        }
    };

    observe_order_placed("created");

    span.record("order_uuid", tracing::field::display(placed.order.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderPlacedResponse {
        detail: "Order created.".to_string(),
        order_id: placed.order.uuid.into(),
        total_amount: format_amount(placed.order.total_amount),
        gateway_order_id: placed.gateway_order_id,
        currency: placed.currency,
        gateway_raw_response: placed.gateway_raw_response,
    }))
}
