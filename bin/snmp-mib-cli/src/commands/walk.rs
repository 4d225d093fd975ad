// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `snmp-mib walk`: print a subtree in identifier order.

use super::HostDevice;
use oid_registry::Oid;
use snmp_mib::SnmpConfig;

pub async fn execute(config: SnmpConfig, prefix: &str, json: bool) -> anyhow::Result<()> {
    let prefix: Oid = prefix.parse()?;
    let device = HostDevice::start(config)?;
    let bindings: Vec<_> = device.component.registry().walk(&prefix).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }

    if bindings.is_empty() {
        println!("No entries under .{prefix}");
    }
    for vb in &bindings {
        println!("{vb}");
    }
    Ok(())
}
