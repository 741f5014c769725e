//! Remove From Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    responses::DetailResponse,
    state::State,
    wishlists::{errors::into_status_error, models::WishlistProductRequest},
};

/// Remove From Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Remove from Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Removed from wishlist"),
        (status_code = StatusCode::BAD_REQUEST, description = "No product given"),
        (status_code = StatusCode::NOT_FOUND, description = "Not in wishlist"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<WishlistProductRequest>,
    depot: &mut Depot,
) -> Result<Json<DetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let Some(product) = json.into_inner().product_id else {
        return Err(StatusError::bad_request().brief("Provide product_id."));
    };

    state
        .app
        .wishlists
        .remove_item(user, product.into())
        .await
        .map_err(|error| into_status_error(error, "Not found in wishlist."))?;

    Ok(Json(DetailResponse::new("Removed from wishlist.")))
}
