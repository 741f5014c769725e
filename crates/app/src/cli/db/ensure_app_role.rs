use clap::Args;
use sqlx::{Postgres, Transaction, query, query_scalar};
use storefront_app::database;

/// Flags that keep the runtime role subject to row-level security.
const ROLE_FLAGS: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the JSON API connects as
    #[arg(long, default_value = "storefront_app")]
    role_name: String,

    /// Password to set on the role
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role-name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quote(&mut tx, "SELECT quote_ident($1)", &args.role_name).await?;
    let password = quote(&mut tx, "SELECT quote_literal($1)", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to look up role: {error}"))?;

    let database: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    for sql in role_statements(&role, &password, &database, exists) {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{}`: {error}", redact(&sql, &password)))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit changes: {error}"))?;

    println!("ensured app role: {}", args.role_name);

    Ok(())
}

async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    sql: &'static str,
    value: &str,
) -> Result<String, String> {
    query_scalar(sql)
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to quote value: {error}"))
}

fn redact(sql: &str, password: &str) -> String {
    sql.replace(password, "'***'")
}

/// Role upsert followed by the grants the services need, including on tables
/// created by later migrations.
fn role_statements(role: &str, password: &str, database: &str, exists: bool) -> Vec<String> {
    let verb = if exists { "ALTER" } else { "CREATE" };

    vec![
        format!("{verb} ROLE {role} {ROLE_FLAGS} PASSWORD {password}"),
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
             GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_role_is_created_without_rls_bypass() {
        let statements = role_statements("storefront_app", "'pw'", "shop", false);

        assert!(statements[0].starts_with("CREATE ROLE storefront_app "));
        assert!(statements[0].contains("NOBYPASSRLS"));
        assert!(statements[0].contains("NOSUPERUSER"));
        assert!(statements.iter().any(|sql| sql.contains("ON DATABASE shop")));
    }

    #[test]
    fn existing_role_is_altered() {
        let statements = role_statements("storefront_app", "'pw'", "shop", true);

        assert!(statements[0].starts_with("ALTER ROLE storefront_app "));
    }

    #[test]
    fn redact_hides_password_literal() {
        assert_eq!(
            redact("ALTER ROLE a PASSWORD 'hunter2'", "'hunter2'"),
            "ALTER ROLE a PASSWORD '***'"
        );
    }
}
