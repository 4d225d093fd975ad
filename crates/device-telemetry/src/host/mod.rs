// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Linux host telemetry, used to emulate an ESP32-family board on a
//! development machine.
//!
//! All reads are non-blocking and degrade gracefully: only
//! `/proc/meminfo` is required, everything else falls back to defaults.

mod cpu;
mod memory;
mod probe;
mod snapshot;
mod sysfs;
mod thermal;

pub use cpu::CpuInfo;
pub use memory::MemoryInfo;
pub use probe::LinuxProbe;
pub use snapshot::HostSnapshot;
pub use thermal::ThermalZone;
