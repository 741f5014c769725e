//! Persisted orders and items, plus the results of placing and verifying them.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    domain::{
        orders::status::OrderStatus,
        products::records::{ProductUuid, ProductVariationUuid},
        users::records::UserUuid,
    },
    gateway::PaymentConfirmation,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,

    /// Sum of `qty * price_at_order` over the order items, fixed at creation.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Whether all three stored gateway references equal the confirmation.
    #[must_use]
    pub fn matches_confirmation(&self, confirmation: &PaymentConfirmation) -> bool {
        self.gateway_order_id.as_deref() == Some(confirmation.gateway_order_id.as_str())
            && self.gateway_payment_id.as_deref() == Some(confirmation.gateway_payment_id.as_str())
            && self.gateway_signature.as_deref() == Some(confirmation.signature.as_str())
    }
}

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order: OrderUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub variation: Option<ProductVariationUuid>,
    pub qty: u32,
    pub price_at_order: Decimal,
}

impl OrderItemRecord {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price_at_order * Decimal::from(self.qty)
    }
}

/// Order with its items.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// Result of placing an order: the pending order plus what the client needs
/// to start the payment.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub gateway_order_id: String,
    pub currency: String,

    /// Provider response body for the remote order.
    pub gateway_raw_response: Value,
}

/// Outcome of a successful payment verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The order moved from `PENDING` to `PAID`.
    Paid,

    /// The order was already `PAID` with the same references.
    AlreadyPaid,
}

#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    pub order: OrderRecord,
    pub outcome: VerificationOutcome,

    /// Cart lines deleted as part of this verification.
    pub cart_items_removed: u64,
}
