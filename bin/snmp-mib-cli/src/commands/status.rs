// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `snmp-mib status`: host readings and a summary of the served tree.
//!
//! On hosts without swap or thermal zones some rows read 0; the command
//! still works.

use super::HostDevice;
use device_telemetry::Board;
use oid_registry::{Finalized, Oid, OidRegistry, ValueKind};
use snmp_mib::mib::{oids, vendor_root};
use snmp_mib::SnmpConfig;

pub async fn execute(config: SnmpConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              snmp-mib · Device Status               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let device = HostDevice::start(config)?;
    device.component.dump_config();
    let board = device.board.as_ref();
    let reg = device.component.registry();

    // ── Identity ───────────────────────────────────────────────
    println!("  Identity");
    println!("   Name:         {}", read(reg, oids::SYS_NAME));
    println!("   Description:  {}", read(reg, oids::SYS_DESCR));
    println!("   Object ID:    .{}", vendor_root(board));
    println!();

    // ── Hardware ───────────────────────────────────────────────
    let chip = board.chip_identity();
    println!("  Hardware");
    println!("   Family:       {}", board.family());
    println!("   Chip:         {} rev {} ({} cores)", chip.model, chip.revision, chip.cores);
    println!("   Frequency:    {} MHz", board.cpu_freq_mhz());
    println!("   RAM:          {} KB", board.physical_memory_kb());
    println!();

    // ── Memory ─────────────────────────────────────────────────
    const MB: i64 = 1024 * 1024;
    println!("  Memory");
    for &(arc, stat) in board.heap_layout() {
        let bytes = board.read_heap(stat).unwrap_or(0);
        println!(
            "   {:<13} {} MB  (.{}.{arc}.0)",
            format!("{stat:?}:"),
            bytes / MB,
            vendor_root(board)
        );
    }
    let aux = board.aux_memory().unwrap_or_default();
    println!(
        "   Aux memory:   {} / {} MB used",
        aux.used_bytes / MB as u64,
        aux.total_bytes / MB as u64
    );
    println!();

    // ── Tree ───────────────────────────────────────────────────
    println!("  MIB");
    println!("   Entries:      {}", reg.len());
    let dynamic = reg.iter().filter(|e| e.source().is_dynamic()).count();
    println!("   Dynamic:      {dynamic}");
    for kind in [
        ValueKind::Integer,
        ValueKind::OctetString,
        ValueKind::ObjectIdentifier,
        ValueKind::Timestamp,
    ] {
        let n = reg.iter().filter(|e| e.kind() == kind).count();
        println!("   {:<13} {n}", format!("{kind}:"));
    }
    println!();

    println!("{}", device.board.probe().snapshot().summary());
    Ok(())
}

fn read(reg: &OidRegistry<Finalized>, arcs: &[u32]) -> String {
    reg.get(&Oid::from_slice(arcs))
        .into_option()
        .map(|vb| vb.value.to_string())
        .unwrap_or_default()
}
