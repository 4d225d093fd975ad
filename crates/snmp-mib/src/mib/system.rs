// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The `system` group (`1.3.6.1.2.1.1`).

use super::{oids, vendor_root, Telemetry};
use crate::SnmpConfig;
use device_telemetry::ticks_from_millis;
use oid_registry::{Building, Oid, OidRegistry, RegistryError};
use std::sync::Arc;

/// Longest `sysDescr` the firmware reports, in bytes.
const MAX_DESCRIPTION_LEN: usize = 127;

/// `sysServices`: applications layer only (2^(7-1)).
const SERVICES_APPLICATIONS: i32 = 64;

/// Build-time identity folded into `sysDescr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub framework: String,
    pub version: String,
    /// Compilation timestamp as a display string.
    pub compiled: String,
    pub board: String,
}

impl BuildInfo {
    /// Build info for this crate's version, stamped with the UTC time the
    /// build script ran.
    pub fn current(board: impl Into<String>) -> Self {
        Self {
            framework: "snmp-mib".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            compiled: env!("SNMP_MIB_BUILD_TIMESTAMP").to_string(),
            board: board.into(),
        }
    }

    /// `"<framework> version <v> compiled <ts>, Board <board>"`, cut to
    /// 127 bytes on a character boundary.
    pub fn description(&self) -> String {
        let mut text = format!(
            "{} version {} compiled {}, Board {}",
            self.framework, self.version, self.compiled, self.board
        );
        if text.len() > MAX_DESCRIPTION_LEN {
            let mut cut = MAX_DESCRIPTION_LEN;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        text
    }
}

/// Static descriptors of the system group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemIdentity {
    pub description: String,
    pub name: String,
    pub contact: String,
    pub location: String,
}

impl SystemIdentity {
    pub fn new(config: &SnmpConfig, build: &BuildInfo) -> Self {
        Self {
            description: build.description(),
            name: config.name.clone(),
            contact: config.contact.clone(),
            location: config.location.clone(),
        }
    }
}

pub(super) fn register(
    reg: &mut OidRegistry<Building>,
    telemetry: &Telemetry,
    identity: &SystemIdentity,
) -> Result<(), RegistryError> {
    reg.add_static_string(Oid::from_slice(oids::SYS_DESCR), identity.description.as_str())?;
    reg.add_oid(
        Oid::from_slice(oids::SYS_OBJECT_ID),
        vendor_root(telemetry.board.as_ref()),
    )?;

    // sysUpTime counts from network association, not from boot.
    let wifi = Arc::downgrade(&telemetry.wifi);
    let clock = Arc::downgrade(&telemetry.clock);
    reg.add_dynamic_timestamp(Oid::from_slice(oids::SYS_UPTIME), move || {
        let connected_at = wifi.upgrade()?.connected_at_ms()?;
        let now = clock.upgrade()?.millis();
        Some(ticks_from_millis(now.saturating_sub(connected_at)))
    })?;

    reg.add_static_string(Oid::from_slice(oids::SYS_CONTACT), identity.contact.as_str())?;

    let name: Arc<str> = Arc::from(identity.name.as_str());
    reg.add_dynamic_string(Oid::from_slice(oids::SYS_NAME), move || {
        Some(name.to_string())
    })?;

    reg.add_static_string(Oid::from_slice(oids::SYS_LOCATION), identity.location.as_str())?;
    reg.add_static_integer(Oid::from_slice(oids::SYS_SERVICES), SERVICES_APPLICATIONS)?;
    Ok(())
}
