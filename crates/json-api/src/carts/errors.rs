//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("No matching cart items found."),
        CartsServiceError::MissingSelector => {
            StatusError::bad_request().brief("Provide cart_item_id or product_id.")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("qty must be a positive integer.")
        }
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload.")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
