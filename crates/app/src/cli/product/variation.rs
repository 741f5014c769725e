use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::products::{
        PgProductsService, ProductsService,
        data::NewProductVariation,
        records::{ProductUuid, ProductVariationUuid},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateVariationArgs {
    /// Product the variation belongs to
    #[arg(long)]
    product_uuid: Uuid,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    size: Option<String>,

    /// Price override; the product price applies when omitted
    #[arg(long)]
    price: Option<Decimal>,

    /// List the variation as unavailable
    #[arg(long)]
    unavailable: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateVariationArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let variation = PgProductsService::new(Db::new(pool))
        .create_variation(NewProductVariation {
            uuid: ProductVariationUuid::new(),
            product: ProductUuid::from_uuid(args.product_uuid),
            color: args.color,
            size: args.size,
            price: args.price,
            is_available: !args.unavailable,
        })
        .await
        .map_err(|error| format!("failed to create variation: {error}"))?;

    println!("variation_uuid: {}", variation.uuid);
    println!("product_uuid: {}", variation.product);

    if let Some(price) = variation.price {
        println!("price: {price:.2}");
    }

    Ok(())
}
