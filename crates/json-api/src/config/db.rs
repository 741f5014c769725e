//! Database Config

use std::time::Duration;

use clap::Args;

use storefront_app::database::PoolSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for a role subject to row-level security
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5)]
    pub database_acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database_max_connections,
            acquire_timeout: Duration::from_secs(self.database_acquire_timeout_seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        database: DatabaseConfig,
    }

    #[test]
    fn pool_settings_follow_flags() -> Result<(), clap::Error> {
        let harness = Harness::try_parse_from([
            "test",
            "--database-url",
            "postgresql://storefront_app@localhost/storefront",
            "--database-max-connections",
            "25",
            "--database-acquire-timeout-seconds",
            "2",
        ])?;

        assert_eq!(
            harness.database.pool_settings(),
            PoolSettings {
                max_connections: 25,
                acquire_timeout: Duration::from_secs(2),
            }
        );

        Ok(())
    }

    #[test]
    fn database_url_is_required() {
        let result = Harness::try_parse_from(["test"]);

        assert!(
            result.is_err() || std::env::var_os("DATABASE_URL").is_some(),
            "expected missing --database-url to be rejected"
        );
    }
}
