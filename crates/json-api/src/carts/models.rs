//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{Cart, CartItemRecord};

use crate::responses::format_amount;

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub items: Vec<CartItemResponse>,

    /// Sum of line totals, two decimal places
    pub total_price: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total_price = format_amount(cart.total());

        Self {
            uuid: cart.uuid.into(),
            user_uuid: cart.user.into(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_price,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub variation_uuid: Option<Uuid>,
    pub qty: u32,

    /// Unit price captured when the product was first added
    pub price_at_add: String,
    pub line_total: String,

    /// Whether the product (or variation) is currently on sale
    pub is_available: bool,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        let price_at_add = format_amount(item.unit_price());
        let line_total = format_amount(item.line_total());

        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product.into(),
            product_name: item.product_name,
            variation_uuid: item.variation.map(Into::into),
            qty: item.qty,
            price_at_add,
            line_total,
            is_available: item.is_available,
        }
    }
}
