//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::{
        data::{CartItemSelector, NewCartItem},
        records::{CartItemRecord, CartItemUuid, CartUuid},
    },
    orders::records::OrderUuid,
    products::records::{ProductUuid, ProductVariationUuid},
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const DELETE_CART_ITEMS_BY_PRODUCT_SQL: &str =
    include_str!("../sql/delete_cart_items_by_product.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");
const DELETE_CART_ITEMS_FOR_ORDER_SQL: &str =
    include_str!("../sql/delete_cart_items_for_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, or add to the quantity of the existing line for the same
    /// product and variation. An existing `price_at_add` is left as it was.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: NewCartItem,
        price_at_add: Decimal,
    ) -> Result<CartItemRecord, sqlx::Error> {
        let qty = i32::try_from(item.qty).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product.into_uuid())
            .bind(item.variation.map(ProductVariationUuid::into_uuid))
            .bind(qty)
            .bind(price_at_add)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        selector: CartItemSelector,
    ) -> Result<u64, sqlx::Error> {
        let result = match selector {
            CartItemSelector::Item(item) => {
                query(DELETE_CART_ITEM_SQL)
                    .bind(item.into_uuid())
                    .bind(cart.into_uuid())
                    .execute(&mut **tx)
                    .await?
            }
            CartItemSelector::Product { product, variation } => {
                query(DELETE_CART_ITEMS_BY_PRODUCT_SQL)
                    .bind(cart.into_uuid())
                    .bind(product.into_uuid())
                    .bind(variation.map(ProductVariationUuid::into_uuid))
                    .execute(&mut **tx)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete the lines matching an order's items by product and variation.
    /// Lines the user already removed are simply not matched.
    pub(crate) async fn delete_cart_items_for_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEMS_FOR_ORDER_SQL)
            .bind(cart.into_uuid())
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let qty: i32 = row.try_get("qty")?;

        let qty = u32::try_from(qty).map_err(|e| sqlx::Error::ColumnDecode {
            index: "qty".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            variation: row
                .try_get::<Option<Uuid>, _>("variation_uuid")?
                .map(ProductVariationUuid::from_uuid),
            qty,
            price_at_add: row.try_get("price_at_add")?,
            current_price: row.try_get("current_price")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
