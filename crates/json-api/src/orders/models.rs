//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderDetails, OrderItemRecord};

use crate::responses::format_amount;

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `PENDING`, `PAID`, `FAILED` or `CANCELLED`
    pub status: String,
    pub total_amount: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        let order = details.order;

        Self {
            uuid: order.uuid.into(),
            status: order.status.to_string(),
            total_amount: format_amount(order.total_amount),
            gateway_order_id: order.gateway_order_id,
            gateway_payment_id: order.gateway_payment_id,
            items: details.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub variation_uuid: Option<Uuid>,
    pub qty: u32,
    pub price_at_order: String,
    pub line_total: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        let line_total = format_amount(item.line_total());

        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product.into(),
            product_name: item.product_name,
            variation_uuid: item.variation.map(Into::into),
            qty: item.qty,
            price_at_order: format_amount(item.price_at_order),
            line_total,
        }
    }
}
