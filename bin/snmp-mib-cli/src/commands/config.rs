// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `snmp-mib config`: print the effective configuration.
//!
//! The output is valid input for `-c`, so it doubles as a template.

use snmp_mib::SnmpConfig;

pub async fn execute(config: SnmpConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
