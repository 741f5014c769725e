//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemSelector, NewCartItem},
            errors::CartsServiceError,
            records::{Cart, CartItemRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(Cart::from_parts(cart, items))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.qty == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_user_transaction(user).await?;

        let quote = self
            .products_repository
            .lookup_price(&mut tx, item.product, item.variation)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let added = self
            .items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item, quote.unit_price)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        tracing::debug!(
            user_uuid = %user,
            cart_uuid = %cart.uuid,
            cart_item_uuid = %added.uuid,
            qty = added.qty,
            "added cart item"
        );

        Ok(added)
    }

    async fn remove_items(
        &self,
        user: UserUuid,
        selector: CartItemSelector,
    ) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_items(&mut tx, cart.uuid, selector)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        self.items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with its items, creating an empty one on first use.
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product (or one of its variations) to the user's cart.
    ///
    /// Repeat adds of the same product and variation increase the quantity and
    /// keep the price captured on the first add.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Delete every line item matching the selector, returning how many went.
    async fn remove_items(
        &self,
        user: UserUuid,
        selector: CartItemSelector,
    ) -> Result<u64, CartsServiceError>;

    /// Delete all line items.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
