//! `estate`: terminal client for the property listing server.
//!
//! Drives the same page logic as the web UI (`property-bff`) and prints
//! what each page would show.

mod commands;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use estate_client::{PropertyClient, resolve_base_url};
use property_bff::{DEFAULT_PAGE_SIZE, PropertyBff};

/// Property listing client.
#[derive(Parser, Debug)]
#[command(name = "estate", about = "Property listing client")]
struct Cli {
    /// Server URL (default: $ESTATE_API_URL, then http://localhost:3001).
    #[arg(long = "server", global = true)]
    server: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List properties, filtered and paginated.
    List {
        /// City contains (case-insensitive).
        #[arg(long)]
        city: Option<String>,
        /// Maximum price.
        #[arg(long = "max-price")]
        max_price: Option<String>,
        /// Minimum surface in m².
        #[arg(long = "min-surface")]
        min_surface: Option<String>,
        /// Page number, from 1.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page (3, 6, 9 or 12).
        #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Show one property.
    Get {
        id: String,
    },

    /// Create a property.
    Create {
        /// JSON body, e.g. '{"title":"Loft","city":"Paris","price":300000,"surface":45}'.
        #[arg(long = "json")]
        json_body: String,
    },

    /// Update the given fields of a property.
    Update {
        id: String,
        /// JSON body with the fields to change.
        #[arg(long = "json")]
        json_body: String,
    },

    /// Delete a property.
    Delete {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Check server status.
    Status,

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = PropertyClient::new(resolve_base_url(cli.server.as_deref()));
    let json_output = cli.output == "json";
    let bff = PropertyBff::new(Arc::new(client.clone()));

    match cli.command {
        Commands::List {
            city,
            max_price,
            min_surface,
            page,
            page_size,
        } => {
            let filter = commands::property::ListArgs {
                city,
                max_price,
                min_surface,
                page,
                page_size,
            };
            commands::property::list(&bff, &filter, json_output).await?;
        }

        Commands::Get { id } => {
            commands::property::get(&bff, &id, json_output).await?;
        }

        Commands::Create { json_body } => {
            commands::property::create(&bff, &json_body).await?;
        }

        Commands::Update { id, json_body } => {
            commands::property::update(&bff, &id, &json_body).await?;
        }

        Commands::Delete { id, yes } => {
            if !yes {
                eprint!("Êtes-vous sûr de vouloir supprimer cette propriété ? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Annulé.");
                    return Ok(());
                }
            }
            commands::property::delete(&bff, &id).await?;
        }

        Commands::Status => {
            commands::property::status(&client).await?;
        }

        Commands::Version => {
            println!("estate cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
