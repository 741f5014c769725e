//! Inputs for creating products and their size variations.

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductUuid, ProductVariationUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

/// New Product Variation Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductVariation {
    pub uuid: ProductVariationUuid,
    pub product: ProductUuid,
    pub color: Option<String>,
    pub size: Option<String>,

    /// Overrides the product price when set.
    pub price: Option<Decimal>,
    pub is_available: bool,
}
