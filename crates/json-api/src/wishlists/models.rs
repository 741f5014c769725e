//! Wishlist Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::wishlists::records::WishlistItemRecord;

use crate::responses::format_amount;

/// Wishlist Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub price: String,
    pub is_available: bool,
    pub added_at: String,
}

impl From<WishlistItemRecord> for WishlistItemResponse {
    fn from(item: WishlistItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product.uuid.into(),
            product_name: item.product.name,
            price: format_amount(item.product.price),
            is_available: item.product.is_available,
            added_at: item.added_at.to_string(),
        }
    }
}

/// Wishlist Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistProductRequest {
    pub product_id: Option<Uuid>,
}
