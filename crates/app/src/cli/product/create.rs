use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::products::{
        PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. `499.00`
    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    description: Option<String>,

    /// List the product as unavailable
    #[arg(long)]
    unavailable: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let product = PgProductsService::new(Db::new(pool))
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            description: args.description,
            price: args.price,
            is_available: !args.unavailable,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {:.2}", product.price);

    Ok(())
}
