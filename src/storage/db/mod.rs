//! Database abstraction layer for multi-backend support.
//!
//! Supports PostgreSQL (production) and SQLite (local file store, tests).
//!
//! # Architecture
//!
//! The abstraction is intentionally minimal:
//! - `SqlitePool` / `PostgresPool`: Connection pool wrappers with the same interface
//! - `DbPool`: The backend chosen at runtime; write strategies dispatch on it
//!
//! # Example
//!
//! ```ignore
//! let pool = SqlitePool::open("data/cpu_info.db", 2, Duration::from_secs(10)).await?;
//! let row = sqlx::query("SELECT 1").fetch_one(pool.inner()).await?;
//! ```

mod postgres;
mod sqlite;

pub use postgres::{PgParams, PostgresPool};
pub use sqlite::SqlitePool;

/// A connectivity handle for one of the supported backends.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub enum DbPool {
    Sqlite(SqlitePool),
    Postgres(PostgresPool),
}

impl DbPool {
    /// Backend name for logging.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Close the pool gracefully.
    pub async fn close(&self) {
        match self {
            Self::Sqlite(pool) => pool.close().await,
            Self::Postgres(pool) => pool.close().await,
        }
    }

    /// Check if the pool is closed.
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Sqlite(pool) => pool.is_closed(),
            Self::Postgres(pool) => pool.is_closed(),
        }
    }
}

impl From<SqlitePool> for DbPool {
    fn from(pool: SqlitePool) -> Self {
        Self::Sqlite(pool)
    }
}

impl From<PostgresPool> for DbPool {
    fn from(pool: PostgresPool) -> Self {
        Self::Postgres(pool)
    }
}
