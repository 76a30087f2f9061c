//! Load the sample catalog

use anyhow::{Context, Result};
use toolshed_core::{Config, seed};

use crate::database;

/// Run the seed command
pub async fn run(config_path: &str, database_url: Option<&str>) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let db = database::open(&config, database_url).await?;
    db.storage.migrate().await.context("Migration failed")?;

    if seed::seed_if_empty(&db.storage)
        .await
        .context("Failed to seed database")?
    {
        tracing::info!("✓ Sample catalog inserted");
    } else {
        tracing::info!("Catalog already has data; nothing to do");
    }
    Ok(())
}
