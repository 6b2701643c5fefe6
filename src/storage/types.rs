//! Core data types for the storage layer.
//!
//! - [`CpuStaticInfo`]: Validated snapshot of host CPU characteristics, one row of `cpu_info`
//! - [`InvalidCpuInfo`]: Constraint violations rejected at construction time

use serde::Serialize;
use thiserror::Error;

/// Constraint violations for [`CpuStaticInfo`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCpuInfo {
    #[error("model name is empty")]
    EmptyModelName,

    #[error("physical core count must be at least 1")]
    NoPhysicalCores,

    #[error("logical core count {logical} is below physical core count {physical}")]
    LogicalBelowPhysical { physical: u32, logical: u32 },

    #[error("frequency {0} MHz is not a finite non-negative number")]
    InvalidFrequency(f64),

    #[error("minimum frequency {min} MHz exceeds maximum frequency {max} MHz")]
    FrequencyRangeInverted { min: f64, max: f64 },
}

/// Static CPU characteristics of the host.
///
/// Fields are private so every instance has passed [`CpuStaticInfo::new`]:
///
/// - `physical_cores >= 1`
/// - `logical_cores >= physical_cores`
/// - `0 <= min_frequency_mhz <= max_frequency_mhz`
///
/// # Example
///
/// ```
/// use cpuinfo_collector::CpuStaticInfo;
///
/// let info = CpuStaticInfo::new("AMD Ryzen 5 7600", 6, 12, 3200.0, 5100.0).unwrap();
/// assert_eq!(info.logical_cores(), 12);
/// assert!(CpuStaticInfo::new("AMD Ryzen 5 7600", 0, 12, 3200.0, 5100.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStaticInfo {
    model_name: String,
    physical_cores: u32,
    logical_cores: u32,
    min_frequency_mhz: f64,
    max_frequency_mhz: f64,
}

impl CpuStaticInfo {
    /// Create a validated snapshot. The model name is trimmed.
    pub fn new(
        model_name: impl AsRef<str>,
        physical_cores: u32,
        logical_cores: u32,
        min_frequency_mhz: f64,
        max_frequency_mhz: f64,
    ) -> Result<Self, InvalidCpuInfo> {
        let model_name = model_name.as_ref().trim();
        if model_name.is_empty() {
            return Err(InvalidCpuInfo::EmptyModelName);
        }
        if physical_cores == 0 {
            return Err(InvalidCpuInfo::NoPhysicalCores);
        }
        if logical_cores < physical_cores {
            return Err(InvalidCpuInfo::LogicalBelowPhysical {
                physical: physical_cores,
                logical: logical_cores,
            });
        }
        for freq in [min_frequency_mhz, max_frequency_mhz] {
            if !freq.is_finite() || freq < 0.0 {
                return Err(InvalidCpuInfo::InvalidFrequency(freq));
            }
        }
        if min_frequency_mhz > max_frequency_mhz {
            return Err(InvalidCpuInfo::FrequencyRangeInverted {
                min: min_frequency_mhz,
                max: max_frequency_mhz,
            });
        }

        Ok(Self {
            model_name: model_name.to_string(),
            physical_cores,
            logical_cores,
            min_frequency_mhz,
            max_frequency_mhz,
        })
    }

    /// Free-text hardware identifier (e.g. "AMD Ryzen 5 7600").
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn physical_cores(&self) -> u32 {
        self.physical_cores
    }

    pub fn logical_cores(&self) -> u32 {
        self.logical_cores
    }

    pub fn min_frequency_mhz(&self) -> f64 {
        self.min_frequency_mhz
    }

    pub fn max_frequency_mhz(&self) -> f64 {
        self.max_frequency_mhz
    }
}
