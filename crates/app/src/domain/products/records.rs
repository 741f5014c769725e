//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Variation UUID
pub type ProductVariationUuid = TypedUuid<ProductVariationRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product Variation Record
#[derive(Debug, Clone)]
pub struct ProductVariationRecord {
    pub uuid: ProductVariationUuid,
    pub product: ProductUuid,
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: Option<Decimal>,
    pub is_available: bool,
    pub created_at: Timestamp,
}

impl ProductVariationRecord {
    /// Unit price for this variation, falling back to the product price.
    #[must_use]
    pub fn effective_price(&self, product_price: Decimal) -> Decimal {
        self.price.unwrap_or(product_price)
    }
}

/// Product with its variations.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: ProductRecord,
    pub variations: Vec<ProductVariationRecord>,
}

/// Current catalog price for a product or one of its variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub unit_price: Decimal,
    pub is_available: bool,
}
