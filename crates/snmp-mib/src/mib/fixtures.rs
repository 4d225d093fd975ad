// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! In-memory board for unit tests.

use device_telemetry::{AuxMemoryStats, Board, BoardFamily, ChipIdentity, FlashStats, HeapStat};

const ESP32_LAYOUT: &[(u32, HeapStat)] = &[
    (1, HeapStat::TotalSize),
    (2, HeapStat::Free),
    (3, HeapStat::MinFree),
    (4, HeapStat::MaxAlloc),
];

const ESP8266_LAYOUT: &[(u32, HeapStat)] = &[
    (1, HeapStat::Free),
    (2, HeapStat::Fragmentation),
    (3, HeapStat::MaxFreeBlock),
];

pub(crate) struct FakeBoard {
    family: BoardFamily,
    heap: Vec<(HeapStat, i64)>,
    aux: Option<AuxMemoryStats>,
    flash: FlashStats,
    chip: ChipIdentity,
    mhz: u32,
    ram_kb: u32,
}

impl FakeBoard {
    pub(crate) fn esp32() -> Self {
        Self {
            family: BoardFamily::Esp32,
            heap: vec![
                (HeapStat::TotalSize, 320_000),
                (HeapStat::Free, 200_000),
                (HeapStat::MinFree, 150_000),
                (HeapStat::MaxAlloc, 110_000),
            ],
            aux: Some(AuxMemoryStats {
                total_bytes: 4 * 1024 * 1024,
                used_bytes: 1024 * 1024,
            }),
            flash: FlashStats {
                size_bytes: 4 * 1024 * 1024,
                sketch_bytes: 1_048_576,
            },
            chip: ChipIdentity {
                model: "ESP32-D0WDQ6".into(),
                cores: 2,
                revision: 1,
            },
            mhz: 240,
            ram_kb: 520,
        }
    }

    pub(crate) fn esp8266() -> Self {
        Self {
            family: BoardFamily::Esp8266,
            heap: vec![
                (HeapStat::Free, 30_000),
                (HeapStat::Fragmentation, 12),
                (HeapStat::MaxFreeBlock, 18_000),
            ],
            aux: None,
            flash: FlashStats {
                size_bytes: 4 * 1024 * 1024,
                sketch_bytes: 400_000,
            },
            chip: ChipIdentity {
                model: "2_7_4".into(),
                cores: 1,
                revision: 0,
            },
            mhz: 80,
            ram_kb: 160,
        }
    }
}

impl Board for FakeBoard {
    fn family(&self) -> BoardFamily {
        self.family
    }

    fn heap_layout(&self) -> &'static [(u32, HeapStat)] {
        match self.family {
            BoardFamily::Esp32 => ESP32_LAYOUT,
            BoardFamily::Esp8266 => ESP8266_LAYOUT,
        }
    }

    fn read_heap(&self, stat: HeapStat) -> Option<i64> {
        self.heap.iter().find(|(s, _)| *s == stat).map(|(_, v)| *v)
    }

    fn aux_memory(&self) -> Option<AuxMemoryStats> {
        self.aux
    }

    fn flash(&self) -> FlashStats {
        self.flash
    }

    fn chip_identity(&self) -> ChipIdentity {
        self.chip.clone()
    }

    fn cpu_freq_mhz(&self) -> u32 {
        self.mhz
    }

    fn physical_memory_kb(&self) -> u32 {
        self.ram_kb
    }
}
