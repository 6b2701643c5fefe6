//! Storage builder and handles.
//!
//! The connectivity provider: turns connection settings into the two open
//! handles the gateway borrows.

use std::path::PathBuf;
use std::time::Duration;

use crate::storage::StorageError;
use crate::storage::db::{DbPool, PgParams, PostgresPool, SqlitePool};
use crate::storage::schema::init_schema;

/// Default maximum connections for the query pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 2;

/// Default time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connections kept for the raw statement handle.
const STATEMENT_POOL_SIZE: u32 = 1;

/// Where the store lives.
#[derive(Clone)]
pub enum StorageTarget {
    /// SQLite database file. Created if missing; the directory must exist.
    Sqlite { path: PathBuf },
    /// PostgreSQL server.
    Postgres {
        host: String,
        port: u16,
        dbname: String,
        user: String,
        password: String,
    },
}

impl std::fmt::Debug for StorageTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite { path } => f.debug_struct("Sqlite").field("path", path).finish(),
            Self::Postgres {
                host,
                port,
                dbname,
                user,
                ..
            } => f
                .debug_struct("Postgres")
                .field("host", host)
                .field("port", port)
                .field("dbname", dbname)
                .field("user", user)
                .finish_non_exhaustive(),
        }
    }
}

/// Builder for constructing the storage layer.
#[derive(Debug, Clone)]
pub struct StorageBuilder {
    target: StorageTarget,
    max_connections: u32,
    connect_timeout: Duration,
    init_schema: bool,
}

impl StorageBuilder {
    /// Create a builder for an explicit target.
    pub fn new(target: StorageTarget) -> Self {
        Self {
            target,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            init_schema: false,
        }
    }

    /// Builder for a SQLite database file.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageTarget::Sqlite { path: path.into() })
    }

    /// Builder for a PostgreSQL server.
    pub fn postgres(
        host: impl Into<String>,
        port: u16,
        dbname: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(StorageTarget::Postgres {
            host: host.into(),
            port,
            dbname: dbname.into(),
            user: user.into(),
            password: password.into(),
        })
    }

    /// Set the maximum number of connections in the query pool.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Create the `cpu_info` table on build if it doesn't exist.
    pub fn init_schema(mut self, init: bool) -> Self {
        self.init_schema = init;
        self
    }

    async fn connect(&self, max_connections: u32) -> Result<DbPool, StorageError> {
        let pool: DbPool = match &self.target {
            StorageTarget::Sqlite { path } => {
                SqlitePool::open(path, max_connections, self.connect_timeout)
                    .await?
                    .into()
            }
            StorageTarget::Postgres {
                host,
                port,
                dbname,
                user,
                password,
            } => {
                let params = PgParams {
                    host,
                    port: *port,
                    dbname,
                    user,
                    password,
                };
                PostgresPool::connect(&params, max_connections, self.connect_timeout)
                    .await?
                    .into()
            }
        };
        Ok(pool)
    }

    /// Open both handles.
    ///
    /// Fails if either connection cannot be established; nothing stays open in
    /// that case.
    pub async fn build(self) -> Result<StorageHandles, StorageError> {
        let query_pool = self.connect(self.max_connections).await?;
        let statement_pool = match self.connect(STATEMENT_POOL_SIZE).await {
            Ok(pool) => pool,
            Err(e) => {
                query_pool.close().await;
                return Err(e);
            }
        };

        let handles = StorageHandles {
            query_pool,
            statement_pool,
        };

        if self.init_schema
            && let Err(e) = init_schema(&handles.query_pool).await
        {
            handles.close().await;
            return Err(e);
        }

        tracing::debug!(target_db = ?self.target, "Storage handles ready");
        Ok(handles)
    }
}

/// Open connectivity handles, owned by the wiring layer.
#[derive(Debug, Clone)]
pub struct StorageHandles {
    /// Handle used by the structured (query builder) strategy.
    pub query_pool: DbPool,
    /// Handle used by the raw statement strategy.
    pub statement_pool: DbPool,
}

impl StorageHandles {
    /// Close both pools gracefully.
    pub async fn close(self) {
        self.query_pool.close().await;
        self.statement_pool.close().await;
    }
}
