// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The board capability interface.
//!
//! Both supported board families publish the same MIB shape. Everything
//! that differs between them (which heap counters exist, whether an
//! auxiliary memory region is present, how the chip identifies itself, how
//! much RAM the part has) sits behind [`Board`], so MIB population has a
//! single code path and never branches on the family.

use crate::TelemetryError;
use std::fmt;
use std::str::FromStr;

/// The two hardware families the MIB distinguishes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BoardFamily {
    #[default]
    Esp32,
    Esp8266,
}

impl BoardFamily {
    /// Numeric family code. Used as the vendor subtree arc and as the
    /// chip type value.
    pub fn code(self) -> u32 {
        match self {
            BoardFamily::Esp32 => 32,
            BoardFamily::Esp8266 => 8266,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardFamily::Esp32 => "esp32",
            BoardFamily::Esp8266 => "esp8266",
        }
    }
}

impl fmt::Display for BoardFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardFamily {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "esp32" => Ok(BoardFamily::Esp32),
            "esp8266" => Ok(BoardFamily::Esp8266),
            other => Err(TelemetryError::UnknownBoard(other.to_string())),
        }
    }
}

/// A heap counter a board may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapStat {
    /// Total heap size in bytes.
    TotalSize,
    /// Currently free heap in bytes.
    Free,
    /// Lowest free heap observed since boot.
    MinFree,
    /// Largest block that can currently be allocated.
    MaxAlloc,
    /// Heap fragmentation in percent.
    Fragmentation,
    /// Largest contiguous free block.
    MaxFreeBlock,
}

/// Auxiliary memory region (external PSRAM) usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct AuxMemoryStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

/// Program flash usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct FlashStats {
    /// Size of the flash chip.
    pub size_bytes: u64,
    /// Size of the running firmware image.
    pub sketch_bytes: u64,
}

/// How the chip describes itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct ChipIdentity {
    /// Chip model name, or the SDK core version where no model is reported.
    pub model: String,
    pub cores: u32,
    pub revision: u32,
}

/// Hardware statistics for one board family.
///
/// Every method is a fast read suitable for the poll loop. Implementations
/// report zero or `None` for anything the hardware does not have; they
/// never fail.
pub trait Board: Send + Sync {
    fn family(&self) -> BoardFamily;

    /// Heap counters published under the family's vendor subtree, as
    /// `(arc, stat)` pairs in arc order.
    fn heap_layout(&self) -> &'static [(u32, HeapStat)];

    /// Current value of a heap counter, `None` if this board lacks it.
    fn read_heap(&self, stat: HeapStat) -> Option<i64>;

    /// Auxiliary memory usage, `None` if the region is absent.
    fn aux_memory(&self) -> Option<AuxMemoryStats>;

    fn flash(&self) -> FlashStats;

    fn chip_identity(&self) -> ChipIdentity;

    fn cpu_freq_mhz(&self) -> u32;

    /// Installed RAM in kilobytes, 0 if unknown.
    fn physical_memory_kb(&self) -> u32;
}

/// Narrows a counter to the 32-bit signed range the MIB carries.
pub fn to_mib_integer(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
