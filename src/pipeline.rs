//! Collection-and-persistence pipeline.
//!
//! Order is fixed: open connectivity handles, collect, save. If the handles
//! cannot be opened the collector is never invoked.

use thiserror::Error;

use crate::collector::{CollectionError, CpuCollector};
use crate::storage::{CpuInfoGateway, PersistError, StorageBuilder, StorageError, WriteMode};

/// Why a pipeline run failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Connectivity provider yielded no usable handle; nothing was collected.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] StorageError),

    /// Collection failed; nothing was written.
    #[error("collection failed: {0}")]
    Collection(#[from] CollectionError),

    /// Persistence failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Collect once and hand the snapshot to `gateway` with `mode`.
pub async fn collect_and_save(
    collector: &dyn CpuCollector,
    gateway: &CpuInfoGateway,
    mode: WriteMode,
) -> Result<(), PipelineError> {
    let info = collector.collect().inspect_err(|e| {
        tracing::error!(error = %e, "CPU info collection failed");
    })?;

    gateway.save(Some(info), mode).await?;
    Ok(())
}

/// Open storage, collect once, save, and close storage.
pub async fn run(
    storage: StorageBuilder,
    collector: &dyn CpuCollector,
    mode: WriteMode,
) -> Result<(), PipelineError> {
    let handles = storage.build().await.map_err(|e| {
        tracing::error!(error = %e, "Database connection failed, aborting before collection");
        PipelineError::Unavailable(e)
    })?;
    tracing::info!(
        backend = handles.query_pool.backend(),
        "Database connections established"
    );

    let gateway = CpuInfoGateway::from_handles(&handles);
    let result = collect_and_save(collector, &gateway, mode).await;

    handles.close().await;
    result
}
