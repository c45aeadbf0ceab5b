//! Newsroom - Main Application Entry Point
//!
//! Serves CRUD operations on posts over HTTP, backed by the storage
//! selected on the command line.

use anyhow::Context;
use clap::Parser;
use newsroom_api::{bootstrap, AppState, Cli, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,newsroom=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;
    let backend = cli.backend(&config)?;

    let storage = bootstrap::open_storage(backend, &cli, &config).await?;
    let app_state = Arc::new(AppState::with_storage(storage.clone()));

    // Build our application with routes
    let app = newsroom_api::create_router(app_state);

    let addr = config.listen_addr();
    tracing::info!("Starting Newsroom server on {} with {} storage", addr, backend);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
