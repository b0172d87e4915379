//! Bus Graph - Main Server
//!
//! Seeds the bus stop network into Neo4j and serves it for visualization.

use anyhow::Result;
use bus_graph::{AppState, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bus-graph")]
#[command(about = "Bus stop network server backed by Neo4j")]
struct Cli {
    /// Path to a YAML config file (defaults to ./config.yaml when present)
    #[arg(short, long, global = true, env = "BUS_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database, then start the HTTP server (default)
    Serve {
        /// Port to listen on (overrides config.yaml / SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve the existing graph without wiping and reseeding it
        #[arg(long)]
        no_seed: bool,
    },

    /// Wipe and reseed the database, then exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bus_graph=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    let result = match cli.command.unwrap_or(Commands::Serve {
        port: None,
        no_seed: false,
    }) {
        Commands::Serve { port, no_seed } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            if no_seed {
                config.seed_on_start = false;
            }
            bus_graph::start_server(config).await
        }
        Commands::Seed => run_seed(config).await,
    };

    if let Err(e) = &result {
        tracing::error!("Fatal: {:#}", e);
    }
    result
}

async fn run_seed(config: Config) -> Result<()> {
    let state = AppState::new(config).await?;
    tracing::info!("Connected to Neo4j");

    let report = state.seed().await?;
    tracing::info!(
        "Seed complete: {} bus stops, {} connections",
        report.bus_stops_created,
        report.connections_created
    );

    Ok(())
}
