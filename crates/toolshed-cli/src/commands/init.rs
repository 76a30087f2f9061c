//! Initialize a new Toolshed project

use anyhow::Result;
use std::fs;
use std::path::Path;
use toolshed_core::config::CONFIG_FILE;

/// Run the init command
pub async fn run(path: &str, name: Option<&str>) -> Result<()> {
    let project_dir = Path::new(path);

    if !project_dir.exists() {
        fs::create_dir_all(project_dir)?;
    }

    let abs_path = project_dir.canonicalize()?;

    // Derive project name from directory name if not provided
    let project_name = match name {
        Some(n) => n.to_string(),
        None => abs_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("Could not determine project name from path"))?,
    };

    if project_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!(
            "Directory '{}' already contains a {}",
            project_dir.display(),
            CONFIG_FILE
        );
    }

    tracing::info!("Creating new Toolshed project: {}", project_name);

    let config = format!(
        r#"# Toolshed Project Configuration
name: {project_name}
version: "0.1.0"

server:
  host: 127.0.0.1
  port: 5000

database:
  # local: embedded PostgreSQL under local.data_dir
  # remote: connect to remote.postgres_url (or pass --database-url / DATABASE_URL)
  mode: local
  local:
    data_dir: ".toolshed/data"
    port: 5433
  max_connections: 5

# Insert the sample catalog when the database has no categories
seed: true
"#
    );
    fs::write(project_dir.join(CONFIG_FILE), config)?;

    let gitignore = r#"# Toolshed local data
.toolshed/

# IDE
.idea/
.vscode/
*.swp
"#;
    fs::write(project_dir.join(".gitignore"), gitignore)?;

    tracing::info!(
        "✓ Created project '{}' at {}",
        project_name,
        abs_path.display()
    );
    tracing::info!("");
    tracing::info!("Next steps:");
    if path != "." {
        tracing::info!("  cd {}", project_dir.display());
    }
    tracing::info!("  toolshed validate    # Check configuration");
    tracing::info!("  toolshed serve       # Start the API");

    Ok(())
}
