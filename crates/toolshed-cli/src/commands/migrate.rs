//! Apply schema migrations

use anyhow::{Context, Result};
use toolshed_core::Config;

use crate::database;

/// Run the migrate command
pub async fn run(config_path: &str, database_url: Option<&str>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let db = database::open(&config, database_url).await?;

    db.storage.migrate().await.context("Migration failed")?;

    tracing::info!("✓ Schema is up to date");
    Ok(())
}
