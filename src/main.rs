//! # Bouquet Storefront server
//!
//! Reads configuration from the environment (and `.env`), opens the
//! configured store and serves the storefront and admin API.

use bouquet_storefront::config::AppConfig;
use bouquet_storefront::{create_app, db};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bouquet_storefront=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting bouquet storefront");

    let config = AppConfig::from_env()?;
    let store = db::open_store(&config).await?;

    let app = create_app(store).layer(TimeoutLayer::new(config.request_timeout));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
