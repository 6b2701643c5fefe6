//! Write strategies for the `cpu_info` table.
//!
//! Two interchangeable ways to insert one [`CpuStaticInfo`] row:
//!
//! - [`StructuredWriter`]: statement built with sqlx's [`QueryBuilder`], run inside a
//!   pool transaction
//! - [`RawStatementWriter`]: literal parameterized `INSERT` run on a connection acquired
//!   for the call
//!
//! Both target the same table and columns and commit before returning, so identical
//! input yields identical rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{Connection, Database, Encode, Postgres, QueryBuilder, Sqlite, Type};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::storage::StorageError;
use crate::storage::db::DbPool;
use crate::storage::schema::{CPU_INFO_COLUMNS, CPU_INFO_TABLE};
use crate::storage::types::CpuStaticInfo;

/// Literal insert used by [`RawStatementWriter`].
///
/// `$N` placeholders are understood by both PostgreSQL and SQLite.
pub const INSERT_CPU_INFO_SQL: &str = "INSERT INTO cpu_info \
     (model_name, physical_cores, logical_cores, min_frequency_mhz, max_frequency_mhz) \
     VALUES ($1, $2, $3, $4, $5)";

/// Which write strategy to use for a save.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum WriteMode {
    /// Insert built through the query builder.
    #[default]
    Structured,
    /// Literal parameterized insert.
    #[serde(alias = "raw")]
    #[strum(to_string = "raw-statement", serialize = "raw")]
    RawStatement,
}

/// A way of inserting one snapshot into `cpu_info`.
///
/// Implementations must commit before returning `Ok` and must leave nothing
/// committed when returning `Err`.
#[async_trait]
pub trait WriteStrategy: Send + Sync {
    /// The mode this strategy implements.
    fn mode(&self) -> WriteMode;

    /// Insert and commit one row.
    async fn write(&self, info: &CpuStaticInfo) -> Result<(), StorageError>;
}

// =============================================================================
// Structured
// =============================================================================

/// Builds the insert with [`QueryBuilder::push_values`].
fn cpu_info_insert<'args, DB>(info: &CpuStaticInfo) -> QueryBuilder<'args, DB>
where
    DB: Database,
    String: Encode<'args, DB> + Type<DB>,
    i64: Encode<'args, DB> + Type<DB>,
    f64: Encode<'args, DB> + Type<DB>,
{
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        CPU_INFO_TABLE,
        CPU_INFO_COLUMNS.join(", ")
    ));
    builder.push_values(std::iter::once(info), |mut row, info| {
        row.push_bind(info.model_name().to_string())
            .push_bind(i64::from(info.physical_cores()))
            .push_bind(i64::from(info.logical_cores()))
            .push_bind(info.min_frequency_mhz())
            .push_bind(info.max_frequency_mhz());
    });
    builder
}

/// Query-builder strategy over a borrowed pool.
#[derive(Debug, Clone)]
pub struct StructuredWriter {
    pool: DbPool,
}

impl StructuredWriter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WriteStrategy for StructuredWriter {
    fn mode(&self) -> WriteMode {
        WriteMode::Structured
    }

    async fn write(&self, info: &CpuStaticInfo) -> Result<(), StorageError> {
        match &self.pool {
            DbPool::Sqlite(pool) => {
                let mut tx = pool.inner().begin().await?;
                let mut insert = cpu_info_insert::<Sqlite>(info);
                insert.build().execute(&mut *tx).await?;
                tx.commit().await?;
            }
            DbPool::Postgres(pool) => {
                let mut tx = pool.inner().begin().await?;
                let mut insert = cpu_info_insert::<Postgres>(info);
                insert.build().execute(&mut *tx).await?;
                tx.commit().await?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Raw statement
// =============================================================================

/// Literal-statement strategy over a borrowed pool.
///
/// Each write acquires its own connection. The connection goes back to the pool
/// when it is dropped, on success and on every error path, and an uncommitted
/// transaction is rolled back at the same point.
#[derive(Debug, Clone)]
pub struct RawStatementWriter {
    pool: DbPool,
}

impl RawStatementWriter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WriteStrategy for RawStatementWriter {
    fn mode(&self) -> WriteMode {
        WriteMode::RawStatement
    }

    async fn write(&self, info: &CpuStaticInfo) -> Result<(), StorageError> {
        match &self.pool {
            DbPool::Sqlite(pool) => {
                let mut conn = pool.inner().acquire().await?;
                let mut tx = conn.begin().await?;
                sqlx::query(INSERT_CPU_INFO_SQL)
                    .bind(info.model_name())
                    .bind(i64::from(info.physical_cores()))
                    .bind(i64::from(info.logical_cores()))
                    .bind(info.min_frequency_mhz())
                    .bind(info.max_frequency_mhz())
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
            }
            DbPool::Postgres(pool) => {
                let mut conn = pool.inner().acquire().await?;
                let mut tx = conn.begin().await?;
                sqlx::query(INSERT_CPU_INFO_SQL)
                    .bind(info.model_name())
                    .bind(i64::from(info.physical_cores()))
                    .bind(i64::from(info.logical_cores()))
                    .bind(info.min_frequency_mhz())
                    .bind(info.max_frequency_mhz())
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ryzen() -> CpuStaticInfo {
        CpuStaticInfo::new("AMD Ryzen 5 7600", 6, 12, 3200.0, 5100.0).unwrap()
    }

    #[test]
    fn test_write_mode_parse() {
        assert_eq!(WriteMode::from_str("structured").unwrap(), WriteMode::Structured);
        assert_eq!(
            WriteMode::from_str("raw-statement").unwrap(),
            WriteMode::RawStatement
        );
        assert_eq!(WriteMode::from_str("RAW").unwrap(), WriteMode::RawStatement);
        assert!(WriteMode::from_str("orm").is_err());
        assert_eq!(WriteMode::RawStatement.to_string(), "raw-statement");
        assert_eq!(WriteMode::default(), WriteMode::Structured);
    }

    #[test]
    fn test_structured_insert_sql_sqlite() {
        let mut insert = cpu_info_insert::<Sqlite>(&ryzen());
        assert_eq!(
            insert.sql(),
            "INSERT INTO cpu_info (model_name, physical_cores, logical_cores, \
             min_frequency_mhz, max_frequency_mhz) VALUES (?, ?, ?, ?, ?)"
        );
        // build() must not panic with the bound arguments
        let _ = insert.build();
    }

    #[test]
    fn test_structured_insert_sql_postgres() {
        let insert = cpu_info_insert::<Postgres>(&ryzen());
        assert_eq!(
            insert.sql(),
            "INSERT INTO cpu_info (model_name, physical_cores, logical_cores, \
             min_frequency_mhz, max_frequency_mhz) VALUES ($1, $2, $3, $4, $5)"
        );
    }

    #[test]
    fn test_raw_statement_targets_same_columns() {
        let columns = CPU_INFO_COLUMNS.join(", ");
        assert!(INSERT_CPU_INFO_SQL.starts_with(&format!("INSERT INTO {CPU_INFO_TABLE} ({columns})")));
    }
}
