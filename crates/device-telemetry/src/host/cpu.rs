// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host CPU identity and frequency.
//!
//! Reads CPU state from:
//! - `/sys/devices/system/cpu/cpu0/cpufreq/` — current and max frequency.
//! - `/sys/devices/system/cpu/online` — online core count.
//! - `/proc/cpuinfo` — model name, revision, and a frequency fallback for
//!   hosts without cpufreq (most VMs and containers).

use super::sysfs::read_sysfs_file;
use crate::TelemetryError;
use std::path::Path;

/// Base sysfs path for CPU information.
const CPU_BASE: &str = "/sys/devices/system/cpu";

const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Host CPU state.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CpuInfo {
    /// Current frequency of core 0 in MHz, 0 if unknown.
    pub frequency_mhz: u32,
    pub online_cores: u32,
    pub model: String,
    pub revision: u32,
}

impl CpuInfo {
    /// Reads CPU information, falling back to defaults for anything the
    /// host does not expose. Never fails.
    pub fn read() -> Self {
        let cpuinfo = std::fs::read_to_string(CPUINFO_PATH).unwrap_or_default();
        let parsed = CpuInfoFields::parse(&cpuinfo);

        let cur_freq_path = format!("{CPU_BASE}/cpu0/cpufreq/scaling_cur_freq");
        let frequency_mhz = match read_freq(Path::new(&cur_freq_path)) {
            Ok(mhz) => mhz,
            Err(e) => {
                tracing::debug!("cpufreq unavailable ({e}), using /proc/cpuinfo");
                parsed.mhz.unwrap_or(0)
            }
        };

        Self {
            frequency_mhz,
            online_cores: read_online_cores(),
            model: parsed.model.unwrap_or_default(),
            revision: parsed.revision.unwrap_or(0),
        }
    }
}

/// Fields of interest in `/proc/cpuinfo`, first occurrence wins.
#[derive(Debug, Default, PartialEq)]
struct CpuInfoFields {
    model: Option<String>,
    revision: Option<u32>,
    mhz: Option<u32>,
}

impl CpuInfoFields {
    fn parse(content: &str) -> Self {
        let mut fields = Self::default();
        for line in content.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                // x86 reports "model name"; Raspberry Pi kernels add "Model".
                "model name" | "Model" | "Hardware" if fields.model.is_none() => {
                    if !value.is_empty() {
                        fields.model = Some(value.to_string());
                    }
                }
                "CPU revision" | "stepping" if fields.revision.is_none() => {
                    fields.revision = value.parse().ok();
                }
                "cpu MHz" if fields.mhz.is_none() => {
                    fields.mhz = value.parse::<f64>().ok().map(|mhz| mhz as u32);
                }
                _ => {}
            }
        }
        fields
    }
}

/// Reads a CPU frequency value from sysfs (reported in kHz, returned as MHz).
fn read_freq(path: &Path) -> Result<u32, TelemetryError> {
    let content = read_sysfs_file(path)?;
    let khz: u64 = content.parse::<u64>().map_err(|_| TelemetryError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected integer kHz value, got '{content}'"),
    })?;
    Ok((khz / 1000) as u32)
}

/// Determines the number of online CPU cores.
///
/// Tries `/sys/devices/system/cpu/online` first (e.g., `"0-3"` → 4 cores),
/// then `std::thread::available_parallelism()`, then 1.
fn read_online_cores() -> u32 {
    let online_path = format!("{CPU_BASE}/online");
    if let Ok(content) = read_sysfs_file(Path::new(&online_path)) {
        if let Some(count) = parse_cpu_range(&content) {
            return count;
        }
    }
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}

/// Parses a CPU range string like `"0-3"` → 4, `"0"` → 1, `"0,2-3"` → 3.
fn parse_cpu_range(s: &str) -> Option<u32> {
    let mut total = 0u32;
    for part in s.split(',') {
        let part = part.trim();
        if let Some((start_s, end_s)) = part.split_once('-') {
            let start: u32 = start_s.trim().parse().ok()?;
            let end: u32 = end_s.trim().parse().ok()?;
            total += end.checked_sub(start)? + 1;
        } else {
            let _: u32 = part.parse().ok()?;
            total += 1;
        }
    }
    (total > 0).then_some(total)
}
