//! HTTP server: reads config from env, opens the store, applies migrations, serves on a fixed port.

use pizza_restaurants::config::{AppConfig, DEFAULT_LOG_FILTER, LISTEN_ADDR};
use pizza_restaurants::{app, apply_migrations, AppState, Store};
use tokio::net::TcpListener;
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

    let app = app(AppState::new(store));
    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
