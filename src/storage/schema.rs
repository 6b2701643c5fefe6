//! Database schema definitions.
//!
//! The `cpu_info` table is normally provisioned outside this crate. [`init_schema`]
//! creates it when asked to (`database.init_schema` / `--init-schema`).

use crate::storage::StorageError;
use crate::storage::db::DbPool;

/// Target table for CPU snapshots.
pub const CPU_INFO_TABLE: &str = "cpu_info";

/// Persisted columns, in insert order.
pub const CPU_INFO_COLUMNS: [&str; 5] = [
    "model_name",
    "physical_cores",
    "logical_cores",
    "min_frequency_mhz",
    "max_frequency_mhz",
];

/// PostgreSQL DDL for the `cpu_info` table.
///
/// No primary key: each collection appends a row.
pub const CPU_INFO_TABLE_DDL_POSTGRES: &str = r#"
CREATE TABLE IF NOT EXISTS cpu_info (
    model_name        TEXT    NOT NULL,
    physical_cores    INTEGER NOT NULL,
    logical_cores     INTEGER NOT NULL,
    min_frequency_mhz NUMERIC NOT NULL,
    max_frequency_mhz NUMERIC NOT NULL
);
"#;

/// SQLite DDL for the `cpu_info` table.
///
/// Frequencies use REAL so that SQLite keeps them as floating point values
/// (NUMERIC affinity would store `3200.0` as the integer `3200`).
pub const CPU_INFO_TABLE_DDL_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS cpu_info (
    model_name        TEXT    NOT NULL,
    physical_cores    INTEGER NOT NULL,
    logical_cores     INTEGER NOT NULL,
    min_frequency_mhz REAL    NOT NULL,
    max_frequency_mhz REAL    NOT NULL
);
"#;

/// Initialize the database schema.
///
/// Creates the `cpu_info` table if it doesn't exist.
pub async fn init_schema(pool: &DbPool) -> Result<(), StorageError> {
    match pool {
        DbPool::Sqlite(pool) => {
            sqlx::query(CPU_INFO_TABLE_DDL_SQLITE)
                .execute(pool.inner())
                .await?;
        }
        DbPool::Postgres(pool) => {
            sqlx::query(CPU_INFO_TABLE_DDL_POSTGRES)
                .execute(pool.inner())
                .await?;
        }
    }

    tracing::info!(backend = pool.backend(), "Database schema initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::db::SqlitePool;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_schema_initialization() {
        let dir = tempdir().unwrap();
        let pool: DbPool = SqlitePool::open(dir.path().join("schema.db"), 1, Duration::from_secs(5))
            .await
            .unwrap()
            .into();

        init_schema(&pool).await.unwrap();
        // Idempotent
        init_schema(&pool).await.unwrap();

        let DbPool::Sqlite(sqlite) = &pool else {
            panic!("expected sqlite pool");
        };
        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('cpu_info') ORDER BY cid")
                .fetch_all(sqlite.inner())
                .await
                .unwrap();
        let columns: Vec<String> = columns.into_iter().map(|(name,)| name).collect();
        assert_eq!(columns, CPU_INFO_COLUMNS);

        pool.close().await;
    }

    #[test]
    fn test_ddl_matches_columns() {
        for ddl in [CPU_INFO_TABLE_DDL_POSTGRES, CPU_INFO_TABLE_DDL_SQLITE] {
            assert!(ddl.contains(CPU_INFO_TABLE));
            for column in CPU_INFO_COLUMNS {
                assert!(ddl.contains(column), "missing column {column}");
            }
        }
    }
}
