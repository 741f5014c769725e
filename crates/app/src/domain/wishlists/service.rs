//! Wishlists service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        users::records::UserUuid,
        wishlists::{
            errors::WishlistsServiceError,
            records::{WishlistAddOutcome, WishlistItemRecord},
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    repository: PgWishlistsRepository,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistsRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn list_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let items = self.repository.list_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistAddOutcome, WishlistsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let inserted = self.repository.add_item(&mut tx, user, product).await?;

        tx.commit().await?;

        Ok(if inserted == 0 {
            WishlistAddOutcome::AlreadyPresent
        } else {
            WishlistAddOutcome::Added
        })
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let rows_affected = self.repository.remove_item(&mut tx, user, product).await?;

        if rows_affected == 0 {
            return Err(WishlistsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// The user's wishlist, most recently added first.
    async fn list_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistItemRecord>, WishlistsServiceError>;

    /// Add a product. Adding one already on the list is a no-op.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistAddOutcome, WishlistsServiceError>;

    /// Remove a product from the list.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::*};

    use super::*;

    #[tokio::test]
    async fn add_item_then_list() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Wish", Decimal::new(4200, 2)).await?;

        let outcome = ctx.wishlists.add_item(ctx.user_uuid, product.uuid).await?;

        assert_eq!(outcome, WishlistAddOutcome::Added);

        let items = ctx.wishlists.list_items(ctx.user_uuid).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.uuid, product.uuid);
        assert_eq!(items[0].product.name, "Wish");

        Ok(())
    }

    #[tokio::test]
    async fn add_item_twice_is_already_present() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Again", Decimal::new(100, 2)).await?;

        ctx.wishlists.add_item(ctx.user_uuid, product.uuid).await?;

        let outcome = ctx.wishlists.add_item(ctx.user_uuid, product.uuid).await?;

        assert_eq!(outcome, WishlistAddOutcome::AlreadyPresent);
        assert_eq!(ctx.wishlists.list_items(ctx.user_uuid).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.wishlists.add_item(ctx.user_uuid, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(WishlistsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_item_then_remove_again_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Bye", Decimal::new(100, 2)).await?;

        ctx.wishlists.add_item(ctx.user_uuid, product.uuid).await?;
        ctx.wishlists.remove_item(ctx.user_uuid, product.uuid).await?;

        let result = ctx.wishlists.remove_item(ctx.user_uuid, product.uuid).await;

        assert!(
            matches!(result, Err(WishlistsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn wishlists_are_isolated_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_user("wisher@example.com").await;
        let product = create_product(&ctx, "Theirs", Decimal::new(100, 2)).await?;

        ctx.wishlists.add_item(other, product.uuid).await?;

        assert!(ctx.wishlists.list_items(ctx.user_uuid).await?.is_empty());

        let result = ctx.wishlists.remove_item(ctx.user_uuid, product.uuid).await;

        assert!(matches!(result, Err(WishlistsServiceError::NotFound)));

        Ok(())
    }
}
