//! Persisted carts and lines, with the priced cart view and its total.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        products::records::{ProductUuid, ProductVariationUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart: CartUuid,
    pub product: ProductUuid,
    pub product_name: String,
    pub variation: Option<ProductVariationUuid>,
    pub qty: u32,

    /// Unit price captured on first add, never re-snapshotted.
    pub price_at_add: Option<Decimal>,

    /// Current catalog unit price, used only when no snapshot exists.
    pub current_price: Decimal,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Snapshot price, or the current catalog price when no snapshot was taken.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price_at_add.unwrap_or(self.current_price)
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.qty)
    }
}

/// Cart with its line items.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    #[must_use]
    pub fn from_parts(record: CartRecord, items: Vec<CartItemRecord>) -> Self {
        Self {
            uuid: record.uuid,
            user: record.user,
            items,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Sum of `unit_price * qty` over every line item.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.items)
    }
}

/// Sum of line totals.
#[must_use]
pub fn cart_total(items: &[CartItemRecord]) -> Decimal {
    items.iter().map(CartItemRecord::line_total).sum()
}
