//! Validate configuration command

use anyhow::{Context, Result};
use toolshed_core::Config;
use toolshed_core::config::DatabaseMode;

/// Run the validate command
pub async fn run(config_path: &str) -> Result<()> {
    tracing::info!("Validating configuration: {}", config_path);

    let config = Config::load(config_path).context("Failed to load configuration")?;
    let project = &config.project;

    tracing::info!("✓ Project: {}", project.name);
    tracing::info!("✓ Version: {}", project.version);
    tracing::info!("✓ Server: http://{}", project.server.bind_address());
    match project.database.mode {
        DatabaseMode::Local => tracing::info!(
            "✓ Database: embedded PostgreSQL in {} (port {})",
            config.data_dir().display(),
            project.database.local.port
        ),
        DatabaseMode::Remote => tracing::info!("✓ Database: remote PostgreSQL"),
    }
    tracing::info!("✓ Seed sample catalog: {}", project.seed);

    tracing::info!("✓ Configuration is valid");
    Ok(())
}
