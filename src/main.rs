//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This is the main entry point for the trivia API server.
// It loads configuration, opens the database, optionally seeds categories and serves the API.
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trivia_api::{Api, Config, SqliteStore};

/// Trivia game REST backend
#[derive(Debug, Parser)]
#[command(name = "trivia-api", version, about)]
struct Args {
    /// sqlx database URL (overrides TRIVIA_DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Listen address (overrides TRIVIA_BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Insert the default categories if none exist
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    if let Some(bind) = args.bind.as_deref() {
        config = config.with_bind_addr(bind)?;
    }

    info!("Starting trivia API server");

    let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;
    if args.seed {
        store.seed_default_categories().await?;
    }

    let api = Api::new(config.bind_addr, Arc::new(store.clone()));
    let result = api.serve().await;

    store.close().await;
    result
}
