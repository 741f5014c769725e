//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{CartsServiceError, data::NewCartItem, records::CartItemUuid};

use crate::{
    carts::{errors::into_status_error, models::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: Uuid,
    pub variation_id: Option<Uuid>,

    /// Defaults to 1
    pub qty: Option<u32>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product: request.product_id.into(),
            variation: request.variation_id.map(Into::into),
            qty: request.qty.unwrap_or(1),
        }
    }
}

/// Added To Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddedToCartResponse {
    pub detail: String,
    pub item: CartItemResponse,
}

/// Add Cart Item Handler
///
/// Repeat adds of the same product and variation increase the quantity and
/// keep the originally captured price.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Added to cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or variation not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<AddedToCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(user, json.into_inner().into())
        .await
        .map_err(|error| match error {
            CartsServiceError::NotFound => {
                StatusError::not_found().brief("Product or variation not found.")
            }
            other => into_status_error(other),
        })?;

    Ok(Json(AddedToCartResponse {
        detail: "Added to cart.".to_string(),
        item: item.into(),
    }))
}
