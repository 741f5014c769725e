//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, NewProductVariation},
        errors::ProductsServiceError,
        records::{
            PriceQuote, ProductDetails, ProductRecord, ProductUuid, ProductVariationRecord,
            ProductVariationUuid,
        },
        repository::PgProductsRepository,
    },
};

/// Catalog tables are shared across users, so these transactions carry no
/// user context.
#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.pool().begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError> {
        let mut tx = self.db.pool().begin().await?;

        let record = self.repository.get_product(&mut tx, product).await?;
        let variations = self.repository.list_variations(&mut tx, product).await?;

        tx.commit().await?;

        Ok(ProductDetails {
            product: record,
            variations,
        })
    }

    async fn lookup_price(
        &self,
        product: ProductUuid,
        variation: Option<ProductVariationUuid>,
    ) -> Result<PriceQuote, ProductsServiceError> {
        let mut tx = self.db.pool().begin().await?;

        let quote = self
            .repository
            .lookup_price(&mut tx, product, variation)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(quote)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.pool().begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_variation(
        &self,
        variation: NewProductVariation,
    ) -> Result<ProductVariationRecord, ProductsServiceError> {
        let mut tx = self.db.pool().begin().await?;

        let created = self.repository.create_variation(&mut tx, variation).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product with its variations.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductDetails, ProductsServiceError>;

    /// Current unit price and availability for a product, or one of its variations.
    async fn lookup_price(
        &self,
        product: ProductUuid,
        variation: Option<ProductVariationUuid>,
    ) -> Result<PriceQuote, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a variation of an existing product.
    async fn create_variation(
        &self,
        variation: NewProductVariation,
    ) -> Result<ProductVariationRecord, ProductsServiceError>;
}
