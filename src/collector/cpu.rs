//! Host CPU collector.
//!
//! Core counts and the model name come from `sysinfo`; the hardware frequency
//! range comes from cpufreq sysfs (see [`cpufreq`](crate::collector::cpufreq)).

use std::path::PathBuf;

use sysinfo::{Cpu, System};

use crate::collector::cpufreq::{DEFAULT_SYSFS_ROOT, FrequencyBounds, read_frequency_bounds};
use crate::collector::{CollectionError, CpuCollector};
use crate::storage::CpuStaticInfo;

/// Model name used when the OS reports no brand string.
pub const UNKNOWN_MODEL: &str = "unknown";

/// Collects [`CpuStaticInfo`] from the running host.
#[derive(Debug, Clone)]
pub struct SystemCpuCollector {
    model_name: Option<String>,
    sysfs_root: PathBuf,
}

impl Default for SystemCpuCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCpuCollector {
    pub fn new() -> Self {
        Self {
            model_name: None,
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }

    /// Report this model name instead of the OS brand string.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Read cpufreq data below this root instead of `/sys`.
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    fn model_name(&self, cpus: &[Cpu]) -> String {
        if let Some(name) = self.model_name.as_deref()
            && !name.trim().is_empty()
        {
            return name.to_string();
        }

        match cpus.first().map(|cpu| cpu.brand().trim()) {
            Some(brand) if !brand.is_empty() => brand.to_string(),
            _ => {
                tracing::warn!("CPU brand not reported, using placeholder model name");
                UNKNOWN_MODEL.to_string()
            }
        }
    }

    fn frequency_bounds(&self, cpus: &[Cpu]) -> Result<FrequencyBounds, CollectionError> {
        if let Some(bounds) = read_frequency_bounds(&self.sysfs_root)? {
            return Ok(bounds);
        }

        // Current clocks, not hardware limits.
        tracing::warn!(
            sysfs_root = %self.sysfs_root.display(),
            "cpufreq bounds unavailable, approximating from current frequencies"
        );
        let mut freqs = cpus.iter().map(|cpu| cpu.frequency() as f64);
        let first = freqs.next().unwrap_or(0.0);
        Ok(freqs.fold(
            FrequencyBounds {
                min_mhz: first,
                max_mhz: first,
            },
            |acc, f| FrequencyBounds {
                min_mhz: acc.min_mhz.min(f),
                max_mhz: acc.max_mhz.max(f),
            },
        ))
    }
}

fn core_count(what: &'static str, count: usize) -> Result<u32, CollectionError> {
    u32::try_from(count).map_err(|_| CollectionError::OutOfRange { what, value: count })
}

impl CpuCollector for SystemCpuCollector {
    fn collect(&self) -> Result<CpuStaticInfo, CollectionError> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(CollectionError::Unavailable("logical core count".to_string()));
        }
        let physical = sys
            .physical_core_count()
            .ok_or_else(|| CollectionError::Unavailable("physical core count".to_string()))?;

        let bounds = self.frequency_bounds(cpus)?;
        let info = CpuStaticInfo::new(
            self.model_name(cpus),
            core_count("physical core count", physical)?,
            core_count("logical core count", cpus.len())?,
            bounds.min_mhz,
            bounds.max_mhz,
        )?;

        tracing::debug!(?info, "Collected cpu info");
        Ok(info)
    }
}
