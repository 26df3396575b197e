//! # Polecat Server
//!
//! Loads configuration, opens the SQLite database, applies migrations and serves the
//! REST API.

use clap::Parser;
use polecat_api::{AppState, build_router};
use polecat_db::Database;
use std::net::SocketAddr;

#[derive(Debug, Parser)]
#[command(name = "polecat", version, about = "Chess club membership and match scheduling")]
struct Cli {
    /// Apply database migrations and exit.
    #[arg(long)]
    migrate_only: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "POLECAT_LOG_JSON")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = polecat_common::config::init()?;

    // Initialize tracing (structured logging)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "polecat=debug,tower_http=debug".into());
    if cli.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::info!("Starting Polecat v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::connect(config).await?;
    db.migrate().await?;
    if cli.migrate_only {
        return Ok(());
    }

    let router = build_router(AppState { db });
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    tracing::info!("REST API listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
