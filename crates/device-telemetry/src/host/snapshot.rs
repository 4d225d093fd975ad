// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregated point-in-time host reading.

use super::{CpuInfo, MemoryInfo};
use crate::TelemetryError;
use std::time::{SystemTime, UNIX_EPOCH};

/// CPU and memory readings taken together.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct HostSnapshot {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    /// Unix timestamp in milliseconds when the snapshot was taken.
    pub timestamp_ms: u64,
}

impl HostSnapshot {
    /// Captures a new snapshot.
    ///
    /// CPU fields degrade to defaults; memory comes from `/proc/meminfo`
    /// and is the one reading that must succeed.
    pub fn capture() -> Result<Self, TelemetryError> {
        let memory = MemoryInfo::read()?;
        let cpu = CpuInfo::read();

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Ok(Self {
            cpu,
            memory,
            timestamp_ms,
        })
    }

    /// One-line summary suitable for logging.
    ///
    /// ```text
    /// Host: Intel(R) Core(TM) i7 @ 2111 MHz (8 cores), Mem 2399/3793 MB avail, Swap 90/99 MB free
    /// ```
    pub fn summary(&self) -> String {
        const MB: u64 = 1024 * 1024;
        format!(
            "Host: {} @ {} MHz ({} cores), Mem {}/{} MB avail, Swap {}/{} MB free",
            if self.cpu.model.is_empty() {
                "unknown CPU"
            } else {
                self.cpu.model.as_str()
            },
            self.cpu.frequency_mhz,
            self.cpu.online_cores,
            self.memory.available_bytes / MB,
            self.memory.total_bytes / MB,
            self.memory.swap_free_bytes / MB,
            self.memory.swap_total_bytes / MB,
        )
    }
}
