// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! ESP8266 boards: single core, no auxiliary memory, fixed 160 KB RAM.

use crate::board::{AuxMemoryStats, Board, BoardFamily, ChipIdentity, FlashStats, HeapStat};

/// Heap counters published under `1.3.9999.8266`.
const HEAP_LAYOUT: &[(u32, HeapStat)] = &[
    (1, HeapStat::Free),
    (2, HeapStat::Fragmentation),
    (3, HeapStat::MaxFreeBlock),
];

const RAM_SIZE_KB: u32 = 160;

/// Raw ESP8266 system calls.
pub trait Esp8266Probe: Send + Sync {
    fn free_heap(&self) -> u64;
    /// Fragmentation in percent.
    fn heap_fragmentation(&self) -> u8;
    fn max_free_block_size(&self) -> u64;
    fn flash_chip_size(&self) -> u64;
    fn sketch_size(&self) -> u64;
    fn cpu_freq_mhz(&self) -> u32;
    /// SDK core version string, reported in place of a chip model name.
    fn core_version(&self) -> String;
}

#[derive(Debug)]
pub struct Esp8266Board<P> {
    probe: P,
}

impl<P: Esp8266Probe> Esp8266Board<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }
}

impl<P: Esp8266Probe> Board for Esp8266Board<P> {
    fn family(&self) -> BoardFamily {
        BoardFamily::Esp8266
    }

    fn heap_layout(&self) -> &'static [(u32, HeapStat)] {
        HEAP_LAYOUT
    }

    fn read_heap(&self, stat: HeapStat) -> Option<i64> {
        match stat {
            HeapStat::Free => Some(self.probe.free_heap() as i64),
            HeapStat::Fragmentation => Some(i64::from(self.probe.heap_fragmentation())),
            HeapStat::MaxFreeBlock => Some(self.probe.max_free_block_size() as i64),
            HeapStat::TotalSize | HeapStat::MinFree | HeapStat::MaxAlloc => None,
        }
    }

    fn aux_memory(&self) -> Option<AuxMemoryStats> {
        None
    }

    fn flash(&self) -> FlashStats {
        FlashStats {
            size_bytes: self.probe.flash_chip_size(),
            sketch_bytes: self.probe.sketch_size(),
        }
    }

    fn chip_identity(&self) -> ChipIdentity {
        ChipIdentity {
            model: self.probe.core_version(),
            cores: 1,
            revision: 0,
        }
    }

    fn cpu_freq_mhz(&self) -> u32 {
        self.probe.cpu_freq_mhz()
    }

    fn physical_memory_kb(&self) -> u32 {
        RAM_SIZE_KB
    }
}
