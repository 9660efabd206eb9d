//! SQLite persistence for incidents and responder assignments.
//!
//! This crate provides async store operations for the incident audit trail
//! using SQLx with SQLite. Incidents are append-only: rows are created at
//! trigger time, mutated only through the coordinator's status updates, and
//! never deleted.
//!
//! # Example
//!
//! ```no_run
//! use incident_store::{incident, IncidentStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let store = IncidentStore::connect("sqlite:dispatch.db?mode=rwc").await?;
//!     store.migrate().await?;
//!
//!     let open = incident::list_incidents(store.pool(), &Default::default()).await?;
//!     println!("{} incidents on record", open.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod incident;
pub mod models;

pub use error::{Result, StoreError};
pub use models::IncidentFilter;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Store connection wrapper.
#[derive(Debug, Clone)]
pub struct IncidentStore {
    pool: SqlitePool,
}

impl IncidentStore {
    /// Default pool size. Sized for concurrent trigger fan-outs and
    /// responder callbacks arriving together.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`;
    /// use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        // A pooled in-memory database would hand each connection its own
        // empty database; those must stay on a single connection.
        let pool_size = if url.contains(":memory:") {
            1
        } else {
            Self::DEFAULT_POOL_SIZE
        };
        Self::connect_with_pool_size(url, pool_size).await
    }

    /// Connect with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to incident store: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run store migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up
    /// to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running incident store migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
