//! Frequency bounds from the Linux cpufreq sysfs interface.
//!
//! Reads `devices/system/cpu/cpuN/cpufreq/cpuinfo_{min,max}_freq` (kHz) below a
//! sysfs root and folds them into one host-wide range.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::collector::CollectionError;

/// Default sysfs mount point.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

const MIN_FREQ_FILE: &str = "cpuinfo_min_freq";
const MAX_FREQ_FILE: &str = "cpuinfo_max_freq";

/// Host-wide hardware frequency range in MHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBounds {
    pub min_mhz: f64,
    pub max_mhz: f64,
}

impl FrequencyBounds {
    fn widen(self, other: Self) -> Self {
        Self {
            min_mhz: self.min_mhz.min(other.min_mhz),
            max_mhz: self.max_mhz.max(other.max_mhz),
        }
    }
}

fn cpu_dir(sysfs_root: &Path) -> PathBuf {
    sysfs_root.join("devices").join("system").join("cpu")
}

/// `cpu0`, `cpu17`, ... but not `cpufreq` or `cpuidle`.
fn is_cpu_entry(name: &str) -> bool {
    name.strip_prefix("cpu")
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

fn read_khz(path: &Path) -> Result<Option<u64>, CollectionError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(CollectionError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| CollectionError::Parse {
            path: path.to_path_buf(),
            value: raw.trim().to_string(),
        })
}

fn read_cpu_bounds(cpufreq: &Path) -> Result<Option<FrequencyBounds>, CollectionError> {
    let min = read_khz(&cpufreq.join(MIN_FREQ_FILE))?;
    let max = read_khz(&cpufreq.join(MAX_FREQ_FILE))?;

    Ok(match (min, max) {
        (Some(min), Some(max)) => Some(FrequencyBounds {
            min_mhz: min as f64 / 1000.0,
            max_mhz: max as f64 / 1000.0,
        }),
        _ => None,
    })
}

/// Read the frequency range across all CPUs.
///
/// Returns `Ok(None)` when sysfs exposes no cpufreq data (non-Linux hosts,
/// containers, VMs without a cpufreq driver). CPUs without a `cpufreq`
/// directory (e.g. offline) are skipped.
pub fn read_frequency_bounds(sysfs_root: &Path) -> Result<Option<FrequencyBounds>, CollectionError> {
    let dir = cpu_dir(sysfs_root);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(CollectionError::Io { path: dir, source }),
    };

    let mut bounds: Option<FrequencyBounds> = None;
    for entry in entries {
        let entry = entry.map_err(|source| CollectionError::Io {
            path: dir.clone(),
            source,
        })?;
        let name = entry.file_name();
        if !name.to_str().is_some_and(is_cpu_entry) {
            continue;
        }

        if let Some(cpu) = read_cpu_bounds(&entry.path().join("cpufreq"))? {
            bounds = Some(match bounds {
                Some(acc) => acc.widen(cpu),
                None => cpu,
            });
        }
    }

    Ok(bounds)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Write a fake cpufreq entry under `root`.
    pub(crate) fn write_cpufreq(root: &Path, cpu: &str, min_khz: &str, max_khz: &str) {
        let cpufreq = cpu_dir(root).join(cpu).join("cpufreq");
        std::fs::create_dir_all(&cpufreq).unwrap();
        std::fs::write(cpufreq.join(MIN_FREQ_FILE), format!("{min_khz}\n")).unwrap();
        std::fs::write(cpufreq.join(MAX_FREQ_FILE), format!("{max_khz}\n")).unwrap();
    }

    #[test]
    fn test_is_cpu_entry() {
        assert!(is_cpu_entry("cpu0"));
        assert!(is_cpu_entry("cpu127"));
        assert!(!is_cpu_entry("cpu"));
        assert!(!is_cpu_entry("cpufreq"));
        assert!(!is_cpu_entry("cpuidle"));
        assert!(!is_cpu_entry("online"));
    }

    #[test]
    fn test_bounds_across_cpus() {
        let dir = tempdir().unwrap();
        write_cpufreq(dir.path(), "cpu0", "3200000", "5100000");
        write_cpufreq(dir.path(), "cpu1", "3000000", "4800000");
        // Not a cpu entry, must be ignored.
        write_cpufreq(dir.path(), "cpufreq", "1", "9999999999");

        let bounds = read_frequency_bounds(dir.path()).unwrap().unwrap();
        assert_eq!(bounds.min_mhz, 3000.0);
        assert_eq!(bounds.max_mhz, 5100.0);
    }

    #[test]
    fn test_offline_cpu_skipped() {
        let dir = tempdir().unwrap();
        write_cpufreq(dir.path(), "cpu0", "800000", "3504500");
        std::fs::create_dir_all(cpu_dir(dir.path()).join("cpu1")).unwrap();

        let bounds = read_frequency_bounds(dir.path()).unwrap().unwrap();
        assert_eq!(bounds.min_mhz, 800.0);
        assert_eq!(bounds.max_mhz, 3504.5);
    }

    #[test]
    fn test_missing_sysfs_is_none() {
        let dir = tempdir().unwrap();
        assert!(read_frequency_bounds(dir.path()).unwrap().is_none());

        std::fs::create_dir_all(cpu_dir(dir.path()).join("cpu0")).unwrap();
        assert!(read_frequency_bounds(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_garbage_value_is_parse_error() {
        let dir = tempdir().unwrap();
        write_cpufreq(dir.path(), "cpu0", "fast", "5100000");

        let err = read_frequency_bounds(dir.path()).unwrap_err();
        assert!(matches!(err, CollectionError::Parse { ref value, .. } if value == "fast"));
    }
}
