//! `estated`: the property listing server.
//!
//! Usage:
//!   estated [-c <config.toml>] [--listen <addr>] [--seed <path>]

mod bootstrap;
mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use property::PropertyModule;
use property::store::MemoryStore;
use tracing::info;

use config::ServerConfig;

/// Property listing server.
#[derive(Parser, Debug)]
#[command(name = "estated", about = "Property listing server", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address (default 0.0.0.0:3001, or 0.0.0.0:$PORT).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Seed file loaded into the store at startup.
    #[arg(long = "seed")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    let port = std::env::var("PORT").ok();
    let config = file_config.resolve(cli.listen.as_deref(), cli.seed.as_deref(), port.as_deref())?;
    bootstrap::verify_config(&config)?;

    // The store lives for the whole process; the module only holds a handle.
    let store = Arc::new(MemoryStore::new());
    let count = bootstrap::load_seed(&config, store.as_ref())?;
    info!("Record store ready with {} properties", count);

    let property_module = PropertyModule::new(store);
    let app = routes::build_router(&[&property_module]);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("estated listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
