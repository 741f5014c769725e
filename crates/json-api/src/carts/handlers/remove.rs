//! Remove Cart Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemSelector;

use crate::{
    carts::errors::into_status_error, extensions::*, responses::DetailResponse, state::State,
};

/// Remove From Cart Request
///
/// Either a line item, or a product with an optional variation. Without a
/// variation every line for the product is removed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemsRequest {
    pub cart_item_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
}

/// Remove Cart Items Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Items from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Removed from cart"),
        (status_code = StatusCode::NOT_FOUND, description = "No matching cart items"),
        (status_code = StatusCode::BAD_REQUEST, description = "No selector given"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveCartItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<DetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let request = json.into_inner();

    let selector = CartItemSelector::from_parts(
        request.cart_item_id.map(Into::into),
        request.product_id.map(Into::into),
        request.variation_id.map(Into::into),
    )
    .map_err(into_status_error)?;

    let removed = state
        .app
        .carts
        .remove_items(user, selector)
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %user, removed, "removed cart items");

    Ok(Json(DetailResponse::new("Removed from cart.")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService, records::CartItemUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{TEST_USER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/remove").post(handler))
    }

    #[tokio::test]
    async fn test_remove_by_item_id() -> TestResult {
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_items()
            .once()
            .withf(move |user, selector| {
                *user == TEST_USER_UUID && *selector == CartItemSelector::Item(item)
            })
            .return_once(|_, _| Ok(1));

        let mut res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "cart_item_id": item.into_uuid() }))
            .send(&make_service(carts))
            .await;

        let body: DetailResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.detail, "Removed from cart.");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_by_product_without_variation() -> TestResult {
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_items()
            .once()
            .withf(move |_, selector| {
                *selector
                    == CartItemSelector::Product {
                        product,
                        variation: None,
                    }
            })
            .return_once(|_, _| Ok(2));

        let res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "product_id": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_without_selector_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_remove_items().never();

        let res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "variation_id": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_nothing_matched_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_items()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "product_id": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
