// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! [`Esp32Probe`] backed by a cached [`HostSnapshot`].
//!
//! Mapping onto the ESP32 counters:
//!
//! | ESP32 | Host |
//! |-------|------|
//! | heap size / free / max alloc | `MemTotal` / `MemAvailable` / `MemAvailable` |
//! | min free heap | lowest `MemAvailable` seen since construction |
//! | PSRAM total / free | `SwapTotal` / `SwapFree` |
//! | sketch size | size of the running executable |
//! | flash size | 0 |
//!
//! Probe methods only read the cache; [`LinuxProbe::refresh`] does the I/O.

use super::HostSnapshot;
use crate::esp32::Esp32Probe;
use crate::TelemetryError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug)]
pub struct LinuxProbe {
    snapshot: RwLock<HostSnapshot>,
    min_available: AtomicU64,
    sketch_bytes: u64,
}

impl LinuxProbe {
    /// Takes the first snapshot. Fails only if `/proc/meminfo` is unreadable.
    pub fn new() -> Result<Self, TelemetryError> {
        Ok(Self::from_snapshot(HostSnapshot::capture()?))
    }

    pub fn from_snapshot(snapshot: HostSnapshot) -> Self {
        let sketch_bytes = std::env::current_exe()
            .and_then(std::fs::metadata)
            .map(|m| m.len())
            .unwrap_or(0);
        Self {
            min_available: AtomicU64::new(snapshot.memory.available_bytes),
            snapshot: RwLock::new(snapshot),
            sketch_bytes,
        }
    }

    /// Re-reads the host. On failure the previous snapshot stays in place.
    pub fn refresh(&self) -> Result<(), TelemetryError> {
        let fresh = HostSnapshot::capture()?;
        self.store(fresh);
        Ok(())
    }

    pub fn snapshot(&self) -> HostSnapshot {
        self.read(|s| s.clone())
    }

    fn store(&self, fresh: HostSnapshot) {
        self.min_available
            .fetch_min(fresh.memory.available_bytes, Ordering::Relaxed);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    fn read<T>(&self, f: impl FnOnce(&HostSnapshot) -> T) -> T {
        match self.snapshot.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl Esp32Probe for LinuxProbe {
    fn heap_size(&self) -> u64 {
        self.read(|s| s.memory.total_bytes)
    }

    fn free_heap(&self) -> u64 {
        self.read(|s| s.memory.available_bytes)
    }

    fn min_free_heap(&self) -> u64 {
        self.min_available.load(Ordering::Relaxed)
    }

    fn max_alloc_heap(&self) -> u64 {
        self.read(|s| s.memory.available_bytes)
    }

    fn psram_free(&self) -> u64 {
        self.read(|s| s.memory.swap_free_bytes)
    }

    fn psram_total(&self) -> u64 {
        self.read(|s| s.memory.swap_total_bytes)
    }

    fn flash_chip_size(&self) -> u64 {
        0
    }

    fn sketch_size(&self) -> u64 {
        self.sketch_bytes
    }

    fn cpu_freq_mhz(&self) -> u32 {
        self.read(|s| s.cpu.frequency_mhz)
    }

    fn chip_model(&self) -> String {
        self.read(|s| s.cpu.model.clone())
    }

    fn chip_model_code(&self) -> u32 {
        0
    }

    fn chip_cores(&self) -> u32 {
        self.read(|s| s.cpu.online_cores)
    }

    fn chip_revision(&self) -> u32 {
        self.read(|s| s.cpu.revision)
    }

    fn total_ram_kb(&self) -> Option<u32> {
        let kb = self.read(|s| s.memory.total_kb());
        Some(u32::try_from(kb).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{CpuInfo, MemoryInfo};
    use crate::{AuxMemoryStats, Board, Esp32Board};

    fn snapshot(available_mb: u64, swap_free_mb: u64) -> HostSnapshot {
        const MB: u64 = 1024 * 1024;
        HostSnapshot {
            cpu: CpuInfo {
                frequency_mhz: 1800,
                online_cores: 4,
                model: "BCM2835".into(),
                revision: 3,
            },
            memory: MemoryInfo {
                total_bytes: 4096 * MB,
                available_bytes: available_mb * MB,
                used_bytes: (4096 - available_mb) * MB,
                swap_total_bytes: 100 * MB,
                swap_free_bytes: swap_free_mb * MB,
            },
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_min_free_tracks_lowest() {
        let probe = LinuxProbe::from_snapshot(snapshot(2000, 100));
        probe.store(snapshot(1500, 100));
        probe.store(snapshot(2500, 100));
        assert_eq!(probe.free_heap(), 2500 * 1024 * 1024);
        assert_eq!(probe.min_free_heap(), 1500 * 1024 * 1024);
    }

    #[test]
    fn test_as_esp32_board() {
        let board = Esp32Board::new(LinuxProbe::from_snapshot(snapshot(2000, 60)));
        assert_eq!(board.physical_memory_kb(), 4096 * 1024);
        assert_eq!(board.cpu_freq_mhz(), 1800);
        assert_eq!(board.chip_identity().model, "BCM2835");
        assert_eq!(
            board.aux_memory(),
            Some(AuxMemoryStats {
                total_bytes: 100 * 1024 * 1024,
                used_bytes: 40 * 1024 * 1024,
            })
        );
        assert_eq!(board.flash().size_bytes, 0);
    }

    #[test]
    fn test_no_swap_is_zero_aux() {
        let board = Esp32Board::new(LinuxProbe::from_snapshot(snapshot(2000, 0)));
        assert_eq!(board.aux_memory(), Some(AuxMemoryStats::default()));
    }

    #[test]
    fn test_refresh_on_linux() {
        if std::path::Path::new("/proc/meminfo").exists() {
            let probe = LinuxProbe::new().unwrap();
            probe.refresh().unwrap();
            assert!(probe.heap_size() > 0);
            assert!(probe.min_free_heap() <= probe.heap_size());
        }
    }
}
