//! Configuration parsing and validation
//!
//! This module handles loading and validating the `toolshed.yaml` project
//! file: where the API listens, which database backs it, and whether the
//! catalog is seeded on startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// File name looked up when a directory is given to [`Config::load`]
pub const CONFIG_FILE: &str = "toolshed.yaml";

/// Root project configuration from `toolshed.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Insert the sample catalog when the database is empty
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_seed() -> bool {
    true
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database mode: local or remote
    #[serde(default)]
    pub mode: DatabaseMode,

    /// Local embedded database settings
    #[serde(default)]
    pub local: LocalConfig,

    /// Remote database settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            mode: DatabaseMode::default(),
            local: LocalConfig::default(),
            remote: RemoteConfig::default(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Database mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseMode {
    /// Embedded PostgreSQL managed by the CLI
    #[default]
    Local,
    /// External PostgreSQL reached through `remote.postgres_url`
    Remote,
}

/// Local embedded database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Directory for embedded Postgres binaries and data
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Port for embedded PostgreSQL
    #[serde(default = "default_pg_port")]
    pub port: u16,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            port: default_pg_port(),
        }
    }
}

fn default_data_dir() -> String {
    ".toolshed/data".to_string()
}

fn default_pg_port() -> u16 {
    5433 // Avoid conflict with system Postgres on 5432
}

/// Remote database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    /// PostgreSQL connection URL
    pub postgres_url: Option<String>,
}

/// Main configuration container
#[derive(Debug, Clone)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Base path of the project
    pub base_path: std::path::PathBuf,
}

impl Config {
    /// Load configuration from a directory or a `toolshed.yaml` path
    ///
    /// ```rust,ignore
    /// let config = Config::load("./my-project")?;
    /// println!("Listening on {}", config.project.server.bind_address());
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let (config_path, base_path) = if path.is_dir() {
            (path.join(CONFIG_FILE), path.to_path_buf())
        } else {
            (
                path.to_path_buf(),
                path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            )
        };

        if !config_path.exists() {
            return Err(Error::ConfigNotFound {
                path: config_path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let project: ProjectConfig = serde_yaml::from_str(&contents)?;

        let config = Self { project, base_path };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        let db = &self.project.database;
        if db.mode == DatabaseMode::Remote && db.remote.postgres_url.is_none() {
            return Err(Error::ConfigInvalid {
                message: "database.mode is 'remote' but database.remote.postgres_url is not set"
                    .to_string(),
            });
        }
        if db.max_connections == 0 {
            return Err(Error::ConfigInvalid {
                message: "database.max_connections must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Local data directory resolved against the project directory
    pub fn data_dir(&self) -> std::path::PathBuf {
        self.base_path.join(&self.project.database.local.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_mode() {
        let mode = DatabaseMode::default();
        assert_eq!(mode, DatabaseMode::Local);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
name: test-project
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "test-project");
        assert_eq!(config.version, "0.1.0");
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.database.local.port, 5433);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.seed);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: test-project
version: "1.0.0"
server:
  host: 0.0.0.0
  port: 8080
database:
  mode: remote
  remote:
    postgres_url: "postgres://db/toolshed"
  max_connections: 10
seed: false
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database.mode, DatabaseMode::Remote);
        assert_eq!(
            config.database.remote.postgres_url.as_deref(),
            Some("postgres://db/toolshed")
        );
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.seed);
    }

    #[test]
    fn test_remote_mode_requires_url() {
        let yaml = "name: x\ndatabase:\n  mode: remote\n";
        let project: ProjectConfig = serde_yaml::from_str(yaml).unwrap();
        let config = Config {
            project,
            base_path: ".".into(),
        };
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_data_dir_is_relative_to_project() {
        let project: ProjectConfig = serde_yaml::from_str("name: x\n").unwrap();
        let config = Config {
            project,
            base_path: "/srv/toolshed".into(),
        };
        assert_eq!(
            config.data_dir(),
            std::path::PathBuf::from("/srv/toolshed/.toolshed/data")
        );
    }
}
