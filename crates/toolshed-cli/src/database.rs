//! Resolve which PostgreSQL instance a command talks to

use anyhow::{Context, Result};
use toolshed_core::Config;
use toolshed_core::config::DatabaseMode;
use toolshed_store::PgStorage;

use crate::local_db::LocalDatabase;

/// Connected store, plus the embedded server when one was started
pub struct Database {
    /// Catalog storage over the pool
    pub storage: PgStorage,
    _local: Option<LocalDatabase>,
}

/// Connect using, in order: an explicit URL, the configured remote URL, or a
/// freshly started embedded server.
pub async fn open(config: &Config, database_url: Option<&str>) -> Result<Database> {
    let db = &config.project.database;

    let (url, local) = match (database_url, db.mode) {
        (Some(url), _) => (url.to_string(), None),
        (None, DatabaseMode::Remote) => {
            let url = db
                .remote
                .postgres_url
                .clone()
                .context("database.remote.postgres_url is not set")?;
            (url, None)
        }
        (None, DatabaseMode::Local) => {
            let local = LocalDatabase::start(&config.data_dir(), db.local.port).await?;
            (local.url().to_string(), Some(local))
        }
    };

    let storage = PgStorage::connect(&url, db.max_connections)
        .await
        .context("Failed to connect to database")?;

    Ok(Database {
        storage,
        _local: local,
    })
}
