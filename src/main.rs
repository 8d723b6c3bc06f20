mod api_doc;
mod app;
mod auth;
mod body;
mod config;
mod cors;
mod error;
mod event;
mod handlers;
mod identity;
mod models;
mod repository;
mod response;
mod router;
mod routes;
mod service;
mod state;

use std::sync::Arc;

use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, StoreConfig};
use repository::{InMemoryItemRepository, ItemRepository, SpannerItemRepository};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("user-items starting");

    let config = Config::from_env()?;
    config.log_startup();

    let repository: Arc<dyn ItemRepository> = match &config.store {
        StoreConfig::Spanner(spanner) => {
            Arc::new(SpannerItemRepository::from_config(spanner, &config.table_name).await?)
        }
        StoreConfig::Memory => Arc::new(InMemoryItemRepository::new()),
    };

    let state = AppState::new(repository, config.cors_policy());
    let app = app::build_router(state);

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
