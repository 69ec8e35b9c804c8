//! Server binary: loads config, opens the shared database pool, mounts the routers and serves
//! until Ctrl-C.

use customer_api::{app, ensure_collections, ensure_database_exists, AppConfig, AppState, PgDocumentStore, COLLECTIONS};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!("connecting to database");
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_collections(&pool, &config.database_name, COLLECTIONS).await?;
    tracing::info!(schema = %config.database_name, "connected to database");

    let store = PgDocumentStore::new(pool.clone(), config.database_name.clone());
    let state = AppState::new(Arc::new(store));

    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
