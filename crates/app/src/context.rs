//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings, RlsRoleError},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        wishlists::{PgWishlistsService, WishlistsService},
    },
    gateway::{RazorpayConfig, RazorpayGateway},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error(transparent)]
    Role(#[from] RlsRoleError),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub products: Arc<dyn ProductsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from database and gateway settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connected role bypasses row-level security.
    pub async fn from_config(
        database_url: &str,
        pool: PoolSettings,
        gateway: RazorpayConfig,
        gateway_timeout: Duration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(database_url, pool)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool).await?;

        let db = Db::new(pool.clone());

        Ok(Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                Arc::new(RazorpayGateway::new(gateway)),
                gateway_timeout,
            )),
            products: Arc::new(PgProductsService::new(db.clone())),
            wishlists: Arc::new(PgWishlistsService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
