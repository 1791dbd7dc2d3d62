//! Reset the configured store and load fixture restaurants, pizzas, and prices.

use pizza_restaurants::config::{AppConfig, DEFAULT_LOG_FILTER};
use pizza_restaurants::{apply_migrations, seed::seed, Store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let store = Store::connect(&config).await?;
    apply_migrations(store.pool()).await?;
    let summary = seed(&store).await?;
    tracing::info!(
        restaurants = summary.restaurants,
        pizzas = summary.pizzas,
        restaurant_pizzas = summary.restaurant_pizzas,
        "seed complete"
    );
    Ok(())
}
