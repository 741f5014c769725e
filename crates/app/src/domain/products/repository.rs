//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::products::{
    data::{NewProduct, NewProductVariation},
    records::{
        PriceQuote, ProductRecord, ProductUuid, ProductVariationRecord, ProductVariationUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCT_VARIATIONS_SQL: &str = include_str!("sql/list_product_variations.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_PRODUCT_VARIATION_SQL: &str = include_str!("sql/create_product_variation.sql");
const LOOKUP_PRICE_SQL: &str = include_str!("sql/lookup_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_variations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariationRecord>, sqlx::Error> {
        query_as::<Postgres, ProductVariationRecord>(LIST_PRODUCT_VARIATIONS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variation: NewProductVariation,
    ) -> Result<ProductVariationRecord, sqlx::Error> {
        query_as::<Postgres, ProductVariationRecord>(CREATE_PRODUCT_VARIATION_SQL)
            .bind(variation.uuid.into_uuid())
            .bind(variation.product.into_uuid())
            .bind(variation.color)
            .bind(variation.size)
            .bind(variation.price)
            .bind(variation.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve the current unit price, `None` when the product is missing or
    /// the variation belongs to a different product.
    pub(crate) async fn lookup_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variation: Option<ProductVariationUuid>,
    ) -> Result<Option<PriceQuote>, sqlx::Error> {
        query_as::<Postgres, PriceQuote>(LOOKUP_PRICE_SQL)
            .bind(product.into_uuid())
            .bind(variation.map(ProductVariationUuid::into_uuid))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductVariationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductVariationUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            price: row.try_get("price")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PriceQuote {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            unit_price: row.try_get("unit_price")?,
            is_available: row.try_get("is_available")?,
        })
    }
}
