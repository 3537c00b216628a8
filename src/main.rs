use anyhow::Result;
use item_service::{create_router, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 12-factor: configuration comes from the environment; .env is a
    // development convenience only.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();
    info!(
        "Starting {} v{}...",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::from_env()?;
    let app = create_router().await?;

    info!("Listening on {}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
