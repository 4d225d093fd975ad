// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host resources (`1.3.6.1.2.1.25`): system uptime, memory size, and a
//! two-row storage table.
//!
//! Row 1 is program flash, row 2 the auxiliary memory region. Both rows
//! exist on every board; a board without auxiliary memory reports a zero
//! size and zero usage so the table shape stays the same.

use super::{bind, oids, Telemetry};
use device_telemetry::{ticks_from_millis, to_mib_integer, Board};
use oid_registry::{Building, Oid, OidRegistry, RegistryError};

/// `hrStorageEntry` columns.
mod column {
    pub const INDEX: u32 = 1;
    pub const DESCR: u32 = 3;
    pub const ALLOCATION_UNITS: u32 = 4;
    pub const SIZE: u32 = 5;
    pub const USED: u32 = 6;
}

const FLASH_INDEX: u32 = 1;
const AUX_INDEX: u32 = 2;

/// Sizes are reported in bytes.
const ALLOCATION_UNIT_BYTES: i32 = 1;

pub(super) fn register(
    reg: &mut OidRegistry<Building>,
    telemetry: &Telemetry,
) -> Result<(), RegistryError> {
    reg.add_dynamic_timestamp(
        Oid::from_slice(oids::HR_SYSTEM_UPTIME),
        bind(&telemetry.clock, |c| Some(ticks_from_millis(c.millis()))),
    )?;

    let cell = |column: u32, index: u32| Oid::from_slice(oids::HR_STORAGE_ENTRY).extend(&[column, index]);

    reg.add_static_integer(cell(column::INDEX, FLASH_INDEX), FLASH_INDEX as i32)?;
    reg.add_static_string(cell(column::DESCR, FLASH_INDEX), "FLASH")?;
    reg.add_static_integer(cell(column::ALLOCATION_UNITS, FLASH_INDEX), ALLOCATION_UNIT_BYTES)?;
    reg.add_dynamic_integer(
        cell(column::SIZE, FLASH_INDEX),
        bind(&telemetry.board, |b| Some(to_mib_integer(b.flash().size_bytes as i64))),
    )?;
    reg.add_dynamic_integer(
        cell(column::USED, FLASH_INDEX),
        bind(&telemetry.board, |b| Some(to_mib_integer(b.flash().sketch_bytes as i64))),
    )?;

    reg.add_static_integer(cell(column::INDEX, AUX_INDEX), AUX_INDEX as i32)?;
    reg.add_static_string(cell(column::DESCR, AUX_INDEX), "SPI RAM")?;
    reg.add_static_integer(cell(column::ALLOCATION_UNITS, AUX_INDEX), ALLOCATION_UNIT_BYTES)?;
    reg.add_dynamic_integer(
        cell(column::SIZE, AUX_INDEX),
        bind(&telemetry.board, |b| {
            Some(to_mib_integer(b.aux_memory().unwrap_or_default().total_bytes as i64))
        }),
    )?;
    reg.add_dynamic_integer(
        cell(column::USED, AUX_INDEX),
        bind(&telemetry.board, |b| {
            Some(to_mib_integer(b.aux_memory().unwrap_or_default().used_bytes as i64))
        }),
    )?;

    // Installed RAM does not change at runtime; read once.
    reg.add_static_integer(
        Oid::from_slice(oids::HR_MEMORY_SIZE),
        to_mib_integer(i64::from(physical_memory_kb(telemetry.board.as_ref()))),
    )?;
    Ok(())
}

fn physical_memory_kb(board: &dyn Board) -> u32 {
    let kb = board.physical_memory_kb();
    if kb == 0 {
        tracing::warn!(family = %board.family(), "unknown chip model, reporting 0 KB RAM");
    }
    kb
}
