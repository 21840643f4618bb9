//! Binks backend - HTTP API for the smart-bin recycling program

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use binks_backend::{config::Args, db::MongoClient, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.to_ascii_lowercase();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("binks_backend={},binks_core={},info", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Binks Backend");
    info!("  Smart bins, sorted waste, BINK rewards");
    info!("======================================");
    info!("Listen: {}", args.listen_addr());
    info!(
        "Database: {}",
        args.redacted_database_url().unwrap_or_else(|| "(not configured)".to_string())
    );
    info!("Database name: {}", args.database_name);
    info!("======================================");

    let mongo =
        MongoClient::connect_optional(args.database_url.as_deref(), &args.database_name).await;

    let state = Arc::new(server::AppState::new(args, mongo)?);
    server::run(state).await?;

    Ok(())
}
