use clap::Args;
use storefront_app::{
    database,
    domain::users::{PgUsersService, UsersService, records::UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct DeactivateUserArgs {
    /// User to deactivate
    #[arg(long)]
    user_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: DeactivateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool)
        .set_active(UserUuid::from_uuid(args.user_uuid), false)
        .await
        .map_err(|error| format!("failed to deactivate user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("is_active: {}", user.is_active);

    Ok(())
}
