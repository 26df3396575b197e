//! # polecat-db
//!
//! Persistence layer for Polecat. A single SQLite database holds users, clubs,
//! memberships, applications and matches. Uniqueness and scheduling guards are part of
//! the schema (see `migrations/`) so they hold even when two requests race.

pub mod constraint;
pub mod repository;
pub mod sqlite;

use std::str::FromStr;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Connect to the configured SQLite database.
    pub async fn connect(config: &polecat_common::config::AppConfig) -> Result<Self> {
        tracing::info!("Connecting to SQLite...");
        let options = SqliteConnectOptions::from_str(&config.database.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_with(options)
            .await?;

        tracing::info!("Connected to SQLite");
        Ok(Self { pool })
    }

    /// A private in-memory database on a single pinned connection.
    ///
    /// Every connection to `sqlite::memory:` is its own database, so the pool must never
    /// open a second one or recycle the first.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Migrations complete");
        Ok(())
    }
}
