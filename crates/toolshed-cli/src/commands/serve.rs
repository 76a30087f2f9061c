//! Run the Toolshed API server

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use toolshed_api::AppState;
use toolshed_core::{Config, MemoryStorage, Storage, seed};

use crate::database;

/// Options for the serve command
pub struct ServeOptions<'a> {
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub database_url: Option<&'a str>,
    pub memory: bool,
}

/// Run the serve command
pub async fn run(config_path: &str, opts: ServeOptions<'_>) -> Result<()> {
    tracing::info!("Loading configuration from {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let server = &config.project.server;

    tracing::info!("Project: {}", config.project.name);

    // Keeps the embedded server alive for as long as the API runs
    let mut _db = None;
    let storage: Arc<dyn Storage> = if opts.memory {
        tracing::info!("Using in-memory storage");
        Arc::new(MemoryStorage::new())
    } else {
        let db = database::open(&config, opts.database_url).await?;
        db.storage.migrate().await.context("Migration failed")?;
        let storage = Arc::new(db.storage.clone());
        _db = Some(db);
        storage
    };

    if config.project.seed && seed::seed_if_empty(storage.as_ref()).await? {
        tracing::info!("Inserted sample catalog");
    }

    let host = opts.host.unwrap_or(&server.host);
    let port = opts.port.unwrap_or(server.port);
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;

    tracing::info!("Starting server (press Ctrl+C to stop)");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received shutdown signal");
    };

    toolshed_api::serve(listener, AppState::new(storage), shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Toolshed stopped");
    Ok(())
}
