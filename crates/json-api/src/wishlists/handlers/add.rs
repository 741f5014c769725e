//! Add To Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use storefront_app::domain::wishlists::records::WishlistAddOutcome;

use crate::{
    extensions::*,
    responses::DetailResponse,
    state::State,
    wishlists::{errors::into_status_error, models::WishlistProductRequest},
};

/// Add To Wishlist Handler
///
/// Adding a product that is already listed succeeds without a second entry.
#[endpoint(
    tags("wishlist"),
    summary = "Add to Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Added, or already present"),
        (status_code = StatusCode::BAD_REQUEST, description = "No product given"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
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

    let outcome = state
        .app
        .wishlists
        .add_item(user, product.into())
        .await
        .map_err(|error| into_status_error(error, "Product not found."))?;

    let detail = match outcome {
        WishlistAddOutcome::Added => "Added to wishlist.",
        WishlistAddOutcome::AlreadyPresent => "Already in wishlist.",
    };

    Ok(Json(DetailResponse::new(detail)))
}
