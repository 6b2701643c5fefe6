//! Core collector traits and types.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{CpuStaticInfo, InvalidCpuInfo};

/// Errors that can occur during collection.
///
/// Collection is all-or-nothing: any error means no snapshot was produced.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The OS did not report a required fact.
    #[error("{0} is not available on this host")]
    Unavailable(String),

    /// Failed to read an OS-provided file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An OS-provided value could not be parsed.
    #[error("unexpected value {value:?} in {path}")]
    Parse { path: PathBuf, value: String },

    /// A reported count does not fit the snapshot's integer width.
    #[error("{what} {value} is out of range")]
    OutOfRange { what: &'static str, value: usize },

    /// Reported values violate the snapshot constraints.
    #[error("invalid cpu info: {0}")]
    Invalid(#[from] InvalidCpuInfo),
}

/// Source of [`CpuStaticInfo`] snapshots.
///
/// Implementations only read host state.
pub trait CpuCollector: Send + Sync {
    /// Produce one validated snapshot.
    fn collect(&self) -> Result<CpuStaticInfo, CollectionError>;
}
