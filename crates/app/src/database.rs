//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions, query, query_as};

use crate::domain::users::records::UserUuid;

/// SQL used to set user context for row-level security.
pub const SET_USER_CONTEXT_SQL: &str = "SELECT set_config('app.current_user_uuid', $1, true)";

/// Must be the first statement of a transaction.
const SET_SERIALIZABLE_SQL: &str = "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set user context for RLS policies.
    ///
    /// Dropping the transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting user context fails.
    pub async fn begin_user_transaction(
        &self,
        user: UserUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        set_user_context(&mut tx, user).await?;

        Ok(tx)
    }

    /// Begin a `SERIALIZABLE` transaction and set user context for RLS policies.
    ///
    /// Used for order placement and payment verification, where the cart
    /// snapshot and the order status must not interleave with concurrent writers.
    /// Conflicting transactions fail at commit with SQLSTATE `40001`.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction, raising its isolation
    /// level or setting user context fails.
    pub async fn begin_serializable_user_transaction(
        &self,
        user: UserUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_SERIALIZABLE_SQL).execute(&mut *tx).await?;

        set_user_context(&mut tx, user).await?;

        Ok(tx)
    }
}

async fn set_user_context(
    tx: &mut Transaction<'static, Postgres>,
    user: UserUuid,
) -> Result<(), sqlx::Error> {
    query(SET_USER_CONTEXT_SQL)
        .bind(user.into_uuid().to_string())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,

    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Connect to `PostgreSQL` with default pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(database_url, PoolSettings::default()).await
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, settings: PoolSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

/// Errors raised when the connected role would bypass row-level security.
#[derive(Debug, thiserror::Error)]
pub enum RlsRoleError {
    #[error("database role `{0}` bypasses row-level security; connect as a NOSUPERUSER NOBYPASSRLS role")]
    Bypasses(String),

    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

/// Refuse to serve requests through a role that ignores RLS policies.
///
/// # Errors
///
/// Returns [`RlsRoleError::Bypasses`] for superuser or `BYPASSRLS` roles.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), RlsRoleError> {
    let (role, bypasses): (String, bool) = query_as(
        "SELECT rolname::text, rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user",
    )
    .fetch_one(pool)
    .await?;

    if bypasses {
        return Err(RlsRoleError::Bypasses(role));
    }

    Ok(())
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
