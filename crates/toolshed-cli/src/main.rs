//! Toolshed CLI
//!
//! Runs the workshop catalog API and browses it from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod database;
mod local_db;
mod render;

use commands::catalog::WorkshopFilter;
use commands::serve::ServeOptions;

/// Toolshed - Hands-on home improvement workshops
#[derive(Parser)]
#[command(name = "toolshed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "toolshed.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Base URL of the API used by client commands
    #[arg(
        long,
        global = true,
        env = "TOOLSHED_API_URL",
        default_value = "http://127.0.0.1:5000"
    )]
    api: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Toolshed project
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Project name (defaults to directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Validate configuration without running
    Validate,

    /// Apply database migrations
    Migrate {
        /// PostgreSQL URL (overrides the configured database)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Insert the sample catalog into an empty database
    Seed {
        /// PostgreSQL URL (overrides the configured database)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Run the API server
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// PostgreSQL URL (overrides the configured database)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Keep the catalog in memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },

    /// List workshop categories
    Categories,

    /// Show a category and its workshops
    Category {
        /// Category ID
        id: i32,
    },

    /// List or search workshops
    Workshops {
        /// Search text matched against title, description and location
        #[arg(short, long)]
        q: Option<String>,

        /// Only workshops in this category
        #[arg(long)]
        category: Option<i32>,

        /// Only featured workshops
        #[arg(long, conflicts_with_all = ["weekend", "q", "category"])]
        featured: bool,

        /// Only workshops happening this weekend
        #[arg(long, conflicts_with_all = ["q", "category"])]
        weekend: bool,
    },

    /// Show workshop details
    Workshop {
        /// Workshop ID
        id: i32,
    },

    /// List hosts
    Hosts,

    /// Show a host
    Host {
        /// Host ID
        id: i32,
    },

    /// List testimonials
    Testimonials,

    /// Book a spot on a workshop
    Book {
        /// Workshop ID
        id: i32,
    },

    /// Join the waitlist for a workshop
    Waitlist {
        /// Workshop ID
        id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = cli.api.as_str();

    match cli.command {
        Commands::Init { path, name } => {
            commands::init::run(&path, name.as_deref()).await?;
        }
        Commands::Validate => {
            commands::validate::run(&cli.config).await?;
        }
        Commands::Migrate { database_url } => {
            commands::migrate::run(&cli.config, database_url.as_deref()).await?;
        }
        Commands::Seed { database_url } => {
            commands::seed::run(&cli.config, database_url.as_deref()).await?;
        }
        Commands::Serve {
            host,
            port,
            database_url,
            memory,
        } => {
            let opts = ServeOptions {
                host: host.as_deref(),
                port,
                database_url: database_url.as_deref(),
                memory,
            };
            commands::serve::run(&cli.config, opts).await?;
        }
        Commands::Categories => {
            commands::catalog::categories(api).await?;
        }
        Commands::Category { id } => {
            commands::catalog::category(api, id).await?;
        }
        Commands::Workshops {
            q,
            category,
            featured,
            weekend,
        } => {
            let filter = if featured {
                WorkshopFilter::Featured
            } else if weekend {
                WorkshopFilter::Weekend
            } else {
                WorkshopFilter::All {
                    q: q.as_deref(),
                    category_id: category,
                }
            };
            commands::catalog::workshops(api, filter).await?;
        }
        Commands::Workshop { id } => {
            commands::catalog::workshop(api, id).await?;
        }
        Commands::Hosts => {
            commands::catalog::hosts(api).await?;
        }
        Commands::Host { id } => {
            commands::catalog::host(api, id).await?;
        }
        Commands::Testimonials => {
            commands::catalog::testimonials(api).await?;
        }
        Commands::Book { id } => {
            commands::booking::book(api, id).await?;
        }
        Commands::Waitlist { id } => {
            commands::booking::waitlist(api, id).await?;
        }
    }

    Ok(())
}
