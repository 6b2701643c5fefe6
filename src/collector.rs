//! Collector Layer
//!
//! Reads static CPU facts from the operating system and produces validated
//! [`CpuStaticInfo`](crate::storage::CpuStaticInfo) snapshots.
//!
//! # Architecture
//!
//! - [`CpuCollector`]: Core trait for snapshot sources
//! - [`SystemCpuCollector`]: `sysinfo` + cpufreq sysfs implementation
//! - [`CollectionError`]: Why no snapshot was produced
//!
//! # Example
//!
//! ```rust,no_run
//! use cpuinfo_collector::collector::{CpuCollector, SystemCpuCollector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let info = SystemCpuCollector::new().collect()?;
//! println!("{} ({} cores)", info.model_name(), info.physical_cores());
//! # Ok(())
//! # }
//! ```

mod cpu;
pub mod cpufreq;
mod traits;

pub use cpu::{SystemCpuCollector, UNKNOWN_MODEL};
pub use traits::{CollectionError, CpuCollector};
