//! Test Helpers

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::query;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::{NewProduct, NewProductVariation},
            records::{ProductRecord, ProductUuid, ProductVariationRecord, ProductVariationUuid},
        },
        users::records::UserUuid,
    },
    gateway::{MockPaymentGateway, RemoteOrder, sign_payment, verify_payment_signature},
    test::TestContext,
};

/// Secret shared by [`sign_test_payment`] and [`accepting_gateway`].
pub(crate) const TEST_GATEWAY_SECRET: &str = "storefront-test-gateway-secret";

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: None,
            price,
            is_available: true,
        })
        .await
}

pub(crate) async fn create_variation(
    ctx: &TestContext,
    product: ProductUuid,
    size: Option<&str>,
    price: Option<Decimal>,
) -> Result<ProductVariationRecord, ProductsServiceError> {
    ctx.products
        .create_variation(NewProductVariation {
            uuid: ProductVariationUuid::new(),
            product,
            color: None,
            size: size.map(str::to_string),
            price,
            is_available: true,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    variation: Option<ProductVariationUuid>,
    qty: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product,
                variation,
                qty,
            },
        )
        .await
}

/// Reprice a product behind the services' back.
pub(crate) async fn set_product_price(
    ctx: &TestContext,
    product: ProductUuid,
    price: Decimal,
) -> Result<(), sqlx::Error> {
    query("UPDATE products SET price = $2, updated_at = now() WHERE uuid = $1")
        .bind(product.into_uuid())
        .bind(price)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// Orders across all users.
pub(crate) async fn count_orders(ctx: &TestContext) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(ctx.db.pool())
        .await
}

/// Order items across all users.
pub(crate) async fn count_order_items(ctx: &TestContext) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(ctx.db.pool())
        .await
}

pub(crate) fn sign_test_payment(gateway_order_id: &str, gateway_payment_id: &str) -> String {
    sign_payment(TEST_GATEWAY_SECRET, gateway_order_id, gateway_payment_id)
        .expect("HMAC accepts keys of any length")
}

pub(crate) fn remote_order(id: &str) -> RemoteOrder {
    RemoteOrder {
        id: id.to_string(),
        raw: json!({ "id": id, "status": "created" }),
    }
}

/// Gateway double that opens a remote order per local order and checks
/// signatures against [`TEST_GATEWAY_SECRET`].
pub(crate) fn accepting_gateway() -> MockPaymentGateway {
    let mut gateway = MockPaymentGateway::new();

    gateway.expect_create_remote_order().returning(|request| {
        let local = request
            .notes
            .get("local_order_id")
            .cloned()
            .unwrap_or_default();

        Ok(remote_order(&format!("order_{local}")))
    });

    gateway
        .expect_verify_signature()
        .returning(|confirmation| verify_payment_signature(TEST_GATEWAY_SECRET, confirmation));

    gateway
}
