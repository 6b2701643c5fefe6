//! Storage Layer
//!
//! Persists [`CpuStaticInfo`] snapshots into the `cpu_info` table of PostgreSQL or
//! SQLite through sqlx.
//!
//! # Components
//!
//! - [`StorageBuilder`] / [`StorageHandles`]: Connectivity provider and the open handles
//! - [`CpuInfoGateway`]: Save entry point, routes to a [`WriteStrategy`] by [`WriteMode`]
//! - [`StructuredWriter`] / [`RawStatementWriter`]: The two write strategies
//! - [`schema`]: Table name, columns and DDL

mod builder;
pub mod db;
mod error;
mod gateway;
pub mod schema;
mod strategy;
mod types;

pub use builder::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_CONNECTIONS, StorageBuilder, StorageHandles,
    StorageTarget,
};
pub use error::{PersistError, StorageError};
pub use gateway::CpuInfoGateway;
pub use strategy::{
    INSERT_CPU_INFO_SQL, RawStatementWriter, StructuredWriter, WriteMode, WriteStrategy,
};
pub use types::{CpuStaticInfo, InvalidCpuInfo};
