//! SQLite persistence layer for QuickBite promo alerting.
//!
//! This crate provides async database operations for promo codes, the
//! global alert threshold configuration, and the append-only alert log
//! using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::{DiscountType, PromoCode}, promo_code};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:quickbite.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a promo code
//!     let promo = PromoCode::new("BITE10", DiscountType::Percentage, 10.0)
//!         .with_usage_limit(100);
//!     promo_code::create_promo_code(db.pool(), &promo).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod alert_log;
pub mod alert_thresholds;
pub mod error;
pub mod models;
pub mod promo_code;

pub use error::{DatabaseError, Result};
pub use models::{
    AlertLogEntry, AlertThresholds, AlertType, DiscountType, PromoCode,
};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    ///
    /// The alert scan runs one query at a time; the headroom covers the
    /// admin API serving reads while a scan is in flight.
    const DEFAULT_POOL_SIZE: u32 = 8;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/quickbite.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
