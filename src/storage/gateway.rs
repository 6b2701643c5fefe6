//! Persistence gateway for CPU snapshots.
//!
//! [`CpuInfoGateway`] owns one [`WriteStrategy`] per [`WriteMode`] and routes each
//! `save` to the requested one. It never opens, closes or retries connections.

use crate::storage::builder::StorageHandles;
use crate::storage::strategy::{RawStatementWriter, StructuredWriter, WriteMode, WriteStrategy};
use crate::storage::types::CpuStaticInfo;
use crate::storage::{PersistError, StorageError};

/// Single entry point for persisting [`CpuStaticInfo`].
pub struct CpuInfoGateway {
    structured: Box<dyn WriteStrategy>,
    raw_statement: Box<dyn WriteStrategy>,
}

impl std::fmt::Debug for CpuInfoGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuInfoGateway").finish_non_exhaustive()
    }
}

impl CpuInfoGateway {
    /// Create a gateway from explicit strategies.
    ///
    /// Each strategy is filed under the [`WriteMode`] it reports, in either
    /// argument order. Two strategies for the same mode are rejected.
    pub fn new(
        first: impl WriteStrategy + 'static,
        second: impl WriteStrategy + 'static,
    ) -> Result<Self, StorageError> {
        let first: Box<dyn WriteStrategy> = Box::new(first);
        let second: Box<dyn WriteStrategy> = Box::new(second);

        match (first.mode(), second.mode()) {
            (WriteMode::Structured, WriteMode::RawStatement) => Ok(Self {
                structured: first,
                raw_statement: second,
            }),
            (WriteMode::RawStatement, WriteMode::Structured) => Ok(Self {
                structured: second,
                raw_statement: first,
            }),
            (mode, _) => Err(StorageError::DuplicateStrategy(mode)),
        }
    }

    /// Create the standard gateway over the connectivity provider's handles.
    ///
    /// The pools are shared, not owned: closing them stays with `handles`.
    pub fn from_handles(handles: &StorageHandles) -> Self {
        Self {
            structured: Box::new(StructuredWriter::new(handles.query_pool.clone())),
            raw_statement: Box::new(RawStatementWriter::new(handles.statement_pool.clone())),
        }
    }

    fn strategy(&self, mode: WriteMode) -> &dyn WriteStrategy {
        match mode {
            WriteMode::Structured => self.structured.as_ref(),
            WriteMode::RawStatement => self.raw_statement.as_ref(),
        }
    }

    /// Persist one snapshot with the chosen strategy.
    ///
    /// Single attempt, no retry. `None` is rejected with
    /// [`PersistError::EmptyInput`] before any I/O.
    pub async fn save(
        &self,
        info: Option<CpuStaticInfo>,
        mode: WriteMode,
    ) -> Result<(), PersistError> {
        let Some(info) = info else {
            tracing::error!(strategy = %mode, "Refusing to save empty cpu info");
            return Err(PersistError::EmptyInput);
        };

        match self.strategy(mode).write(&info).await {
            Ok(()) => {
                tracing::info!(
                    strategy = %mode,
                    model = info.model_name(),
                    physical_cores = info.physical_cores(),
                    logical_cores = info.logical_cores(),
                    "Saved cpu info"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, strategy = %mode, "Failed to save cpu info");
                Err(PersistError::WriteFailed(e))
            }
        }
    }
}
