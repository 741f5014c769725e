//! Inputs for adding cart items and for picking which line to change.

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::CartItemUuid,
    },
    products::records::{ProductUuid, ProductVariationUuid},
};

/// New Cart Item Data
///
/// `uuid` is only used when no line exists yet for `(product, variation)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product: ProductUuid,
    pub variation: Option<ProductVariationUuid>,
    pub qty: u32,
}

/// Which line items a removal applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemSelector {
    /// A single line item.
    Item(CartItemUuid),

    /// Every line for a product, narrowed to one variation when given.
    Product {
        product: ProductUuid,
        variation: Option<ProductVariationUuid>,
    },
}

impl CartItemSelector {
    /// Build a selector from optional request fields. A line item id wins
    /// over a product filter.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::MissingSelector`] when neither a line
    /// item nor a product is given.
    pub fn from_parts(
        item: Option<CartItemUuid>,
        product: Option<ProductUuid>,
        variation: Option<ProductVariationUuid>,
    ) -> Result<Self, CartsServiceError> {
        match (item, product) {
            (Some(item), _) => Ok(Self::Item(item)),
            (None, Some(product)) => Ok(Self::Product { product, variation }),
            (None, None) => Err(CartsServiceError::MissingSelector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_takes_precedence_over_product() {
        let item = CartItemUuid::new();

        let selector = CartItemSelector::from_parts(Some(item), Some(ProductUuid::new()), None);

        assert!(matches!(selector, Ok(CartItemSelector::Item(found)) if found == item));
    }

    #[test]
    fn product_with_variation_builds_filter() {
        let product = ProductUuid::new();
        let variation = ProductVariationUuid::new();

        let selector = CartItemSelector::from_parts(None, Some(product), Some(variation));

        assert!(matches!(
            selector,
            Ok(CartItemSelector::Product { product: p, variation: Some(v) })
                if p == product && v == variation
        ));
    }

    #[test]
    fn variation_alone_is_not_a_selector() {
        let selector = CartItemSelector::from_parts(None, None, Some(ProductVariationUuid::new()));

        assert!(matches!(selector, Err(CartsServiceError::MissingSelector)));
    }
}
