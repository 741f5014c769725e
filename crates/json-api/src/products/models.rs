//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::records::{
    ProductDetails, ProductRecord, ProductVariationRecord,
};

use crate::responses::format_amount;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: format_amount(product.price),
            is_available: product.is_available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Variation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductVariationResponse {
    pub uuid: Uuid,
    pub color: Option<String>,
    pub size: Option<String>,

    /// Override price, `null` when the product price applies
    pub price: Option<String>,

    /// Price a cart line for this variation would be charged
    pub effective_price: String,
    pub is_available: bool,
}

impl ProductVariationResponse {
    fn new(variation: ProductVariationRecord, product_price: rust_decimal::Decimal) -> Self {
        let effective_price = format_amount(variation.effective_price(product_price));

        Self {
            uuid: variation.uuid.into(),
            color: variation.color,
            size: variation.size,
            price: variation.price.map(format_amount),
            effective_price,
            is_available: variation.is_available,
        }
    }
}

/// Product Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub variations: Vec<ProductVariationResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        let product_price = details.product.price;

        Self {
            variations: details
                .variations
                .into_iter()
                .map(|variation| ProductVariationResponse::new(variation, product_price))
                .collect(),
            product: details.product.into(),
        }
    }
}
