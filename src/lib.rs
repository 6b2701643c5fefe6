//! cpuinfo-collector - Host CPU Snapshot Library
//!
//! Collects static CPU characteristics (model, core counts, frequency range) from
//! the operating system and persists them as a row of the `cpu_info` table. It can
//! be used as a library, or run with the `cpuinfo-collector` executable.
//!
//! # Architecture
//!
//! - **Collector**: Reads OS facts into a validated [`CpuStaticInfo`]
//! - **Storage**: PostgreSQL / SQLite persistence with two write strategies
//!   (query builder and raw statement) behind one gateway
//! - **Config**: YAML configuration provider
//! - **Pipeline**: Connect, collect, save
//!
//! # Example
//!
//! ```rust,no_run
//! use cpuinfo_collector::{StorageBuilder, SystemCpuCollector, WriteMode, pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = StorageBuilder::postgres("localhost", 5432, "metrics", "collector", "secret");
//! pipeline::run(storage, &SystemCpuCollector::new(), WriteMode::Structured).await?;
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod pipeline;
pub mod storage;

pub use collector::{CollectionError, CpuCollector, SystemCpuCollector};
pub use config::{AppConfig, ConfigError, DatabaseConfig, DatabaseDriver};
pub use pipeline::PipelineError;
pub use storage::{
    CpuInfoGateway, CpuStaticInfo, InvalidCpuInfo, PersistError, RawStatementWriter,
    StorageBuilder, StorageError, StorageHandles, StructuredWriter, WriteMode, WriteStrategy,
};
