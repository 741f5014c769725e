//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::wishlists::WishlistsServiceError;

/// `not_found` is the message for a missing entry, which differs per endpoint.
pub(crate) fn into_status_error(error: WishlistsServiceError, not_found: &str) -> StatusError {
    match error {
        WishlistsServiceError::NotFound => StatusError::not_found().brief(not_found),
        WishlistsServiceError::Sql(source) => {
            error!("wishlist storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
