// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ESP32-family boards.
//!
//! The raw vendor calls live behind [`Esp32Probe`]; [`Esp32Board`] turns
//! them into the [`Board`] contract. PSRAM is the auxiliary memory region:
//! a part without PSRAM reports zero free bytes, which maps to a zero-sized
//! region rather than a missing one.

use crate::board::{AuxMemoryStats, Board, BoardFamily, ChipIdentity, FlashStats, HeapStat};

/// Heap counters published under `1.3.9999.32`.
const HEAP_LAYOUT: &[(u32, HeapStat)] = &[
    (1, HeapStat::TotalSize),
    (2, HeapStat::Free),
    (3, HeapStat::MinFree),
    (4, HeapStat::MaxAlloc),
];

/// Chip model codes as reported by the IDF chip-info call.
pub mod model {
    pub const ESP32: u32 = 1;
    pub const ESP32_S2: u32 = 2;
    pub const ESP32_C3: u32 = 5;
    pub const ESP32_H2: u32 = 6;
    pub const ESP32_S3: u32 = 9;
    pub const ESP32_C2: u32 = 12;
    pub const ESP32_C6: u32 = 13;
}

/// Raw ESP32 system calls.
pub trait Esp32Probe: Send + Sync {
    fn heap_size(&self) -> u64;
    fn free_heap(&self) -> u64;
    fn min_free_heap(&self) -> u64;
    fn max_alloc_heap(&self) -> u64;
    fn psram_free(&self) -> u64;
    fn psram_total(&self) -> u64;
    fn flash_chip_size(&self) -> u64;
    fn sketch_size(&self) -> u64;
    fn cpu_freq_mhz(&self) -> u32;
    fn chip_model(&self) -> String;
    fn chip_model_code(&self) -> u32;
    fn chip_cores(&self) -> u32;
    fn chip_revision(&self) -> u32;

    /// Installed RAM when the probe knows it directly. The default defers
    /// to the per-model table.
    fn total_ram_kb(&self) -> Option<u32> {
        None
    }
}

/// Internal SRAM size for a chip model code, 0 for unknown models.
pub fn ram_size_kb(model_code: u32) -> u32 {
    match model_code {
        model::ESP32 => 520,
        model::ESP32_S2 => 320,
        model::ESP32_S3 => 512,
        model::ESP32_C2 | model::ESP32_C3 | model::ESP32_C6 => 400,
        model::ESP32_H2 => 256,
        _ => 0,
    }
}

/// An ESP32-family board backed by a probe.
#[derive(Debug)]
pub struct Esp32Board<P> {
    probe: P,
}

impl<P: Esp32Probe> Esp32Board<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: Esp32Probe> Board for Esp32Board<P> {
    fn family(&self) -> BoardFamily {
        BoardFamily::Esp32
    }

    fn heap_layout(&self) -> &'static [(u32, HeapStat)] {
        HEAP_LAYOUT
    }

    fn read_heap(&self, stat: HeapStat) -> Option<i64> {
        let bytes = match stat {
            HeapStat::TotalSize => self.probe.heap_size(),
            HeapStat::Free => self.probe.free_heap(),
            HeapStat::MinFree => self.probe.min_free_heap(),
            HeapStat::MaxAlloc => self.probe.max_alloc_heap(),
            HeapStat::Fragmentation | HeapStat::MaxFreeBlock => return None,
        };
        Some(bytes as i64)
    }

    fn aux_memory(&self) -> Option<AuxMemoryStats> {
        let free = self.probe.psram_free();
        if free == 0 {
            return Some(AuxMemoryStats::default());
        }
        let total = self.probe.psram_total();
        Some(AuxMemoryStats {
            total_bytes: total,
            used_bytes: total.saturating_sub(free),
        })
    }

    fn flash(&self) -> FlashStats {
        FlashStats {
            size_bytes: self.probe.flash_chip_size(),
            sketch_bytes: self.probe.sketch_size(),
        }
    }

    fn chip_identity(&self) -> ChipIdentity {
        ChipIdentity {
            model: self.probe.chip_model(),
            cores: self.probe.chip_cores(),
            revision: self.probe.chip_revision(),
        }
    }

    fn cpu_freq_mhz(&self) -> u32 {
        self.probe.cpu_freq_mhz()
    }

    fn physical_memory_kb(&self) -> u32 {
        self.probe
            .total_ram_kb()
            .unwrap_or_else(|| ram_size_kb(self.probe.chip_model_code()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory probe with fixed readings.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct FixedEsp32 {
        pub heap: [u64; 4],
        pub psram_free: u64,
        pub psram_total: u64,
        pub model_code: u32,
    }

    impl Esp32Probe for FixedEsp32 {
        fn heap_size(&self) -> u64 {
            self.heap[0]
        }
        fn free_heap(&self) -> u64 {
            self.heap[1]
        }
        fn min_free_heap(&self) -> u64 {
            self.heap[2]
        }
        fn max_alloc_heap(&self) -> u64 {
            self.heap[3]
        }
        fn psram_free(&self) -> u64 {
            self.psram_free
        }
        fn psram_total(&self) -> u64 {
            self.psram_total
        }
        fn flash_chip_size(&self) -> u64 {
            4 * 1024 * 1024
        }
        fn sketch_size(&self) -> u64 {
            1_100_000
        }
        fn cpu_freq_mhz(&self) -> u32 {
            240
        }
        fn chip_model(&self) -> String {
            "ESP32-S3".into()
        }
        fn chip_model_code(&self) -> u32 {
            self.model_code
        }
        fn chip_cores(&self) -> u32 {
            2
        }
        fn chip_revision(&self) -> u32 {
            1
        }
    }

    #[test]
    fn test_ram_table() {
        assert_eq!(ram_size_kb(model::ESP32), 520);
        assert_eq!(ram_size_kb(model::ESP32_S2), 320);
        assert_eq!(ram_size_kb(model::ESP32_S3), 512);
        assert_eq!(ram_size_kb(model::ESP32_C2), 400);
        assert_eq!(ram_size_kb(model::ESP32_C3), 400);
        assert_eq!(ram_size_kb(model::ESP32_C6), 400);
        assert_eq!(ram_size_kb(model::ESP32_H2), 256);
        assert_eq!(ram_size_kb(99), 0);
    }

    #[test]
    fn test_heap_layout_covers_readable_stats() {
        let board = Esp32Board::new(FixedEsp32 {
            heap: [300_000, 200_000, 150_000, 110_000],
            ..Default::default()
        });
        let values: Vec<i64> = board
            .heap_layout()
            .iter()
            .map(|&(_, stat)| board.read_heap(stat).unwrap())
            .collect();
        assert_eq!(values, vec![300_000, 200_000, 150_000, 110_000]);
        assert_eq!(board.read_heap(HeapStat::Fragmentation), None);
    }

    #[test]
    fn test_psram_present() {
        let board = Esp32Board::new(FixedEsp32 {
            psram_free: 3_000_000,
            psram_total: 4_000_000,
            ..Default::default()
        });
        assert_eq!(
            board.aux_memory(),
            Some(AuxMemoryStats {
                total_bytes: 4_000_000,
                used_bytes: 1_000_000,
            })
        );
    }

    #[test]
    fn test_psram_absent_reads_zero() {
        let board = Esp32Board::new(FixedEsp32 {
            psram_free: 0,
            psram_total: 4_000_000,
            ..Default::default()
        });
        assert_eq!(board.aux_memory(), Some(AuxMemoryStats::default()));
    }

    #[test]
    fn test_physical_memory_from_model() {
        let board = Esp32Board::new(FixedEsp32 {
            model_code: model::ESP32_S3,
            ..Default::default()
        });
        assert_eq!(board.physical_memory_kb(), 512);
        assert_eq!(board.family(), BoardFamily::Esp32);
        assert_eq!(board.chip_identity().cores, 2);
    }
}
