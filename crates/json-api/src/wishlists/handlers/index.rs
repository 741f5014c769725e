//! Wishlist Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    wishlists::{errors::into_status_error, models::WishlistItemResponse},
};

/// Wishlist Index Handler
///
/// Returns the caller's wishlist, most recently added first.
#[endpoint(
    tags("wishlist"),
    summary = "List Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<WishlistItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let items = state
        .app
        .wishlists
        .list_items(user)
        .await
        .map_err(|error| into_status_error(error, "Wishlist not found."))?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
