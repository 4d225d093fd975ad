// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! MIB population.
//!
//! [`build`] registers every entry of the device tree into a fresh
//! registry and finalizes it. Dynamic entries capture `Weak` handles to
//! the telemetry sources, so the registry never keeps a source alive and a
//! dropped source simply reads as the default value.
//!
//! ```text
//! 1.3.6.1.2.1.1        system group           (system.rs)
//! 1.3.6.1.2.1.25       host resources         (storage.rs)
//! 1.3.9999.<family>    heap counters          (vendor.rs)
//! 1.3.9999.2           chip identity          (vendor.rs)
//! 1.3.9999.4           Wi-Fi link             (vendor.rs)
//! 1.3.9999.10          optional sensors       (vendor.rs)
//! ```

#[cfg(test)]
pub(crate) mod fixtures;
mod storage;
mod system;
mod vendor;

use device_telemetry::{Board, Clock, Sensor, WifiLink};
use oid_registry::{Finalized, Oid, OidRegistry, RegistryError};
use std::sync::{Arc, Weak};

pub use system::{BuildInfo, SystemIdentity};

/// Well-known identifiers of the device tree.
pub mod oids {
    pub const SYS_DESCR: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 1, 0];
    pub const SYS_OBJECT_ID: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 2, 0];
    pub const SYS_UPTIME: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 3, 0];
    pub const SYS_CONTACT: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 4, 0];
    pub const SYS_NAME: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 5, 0];
    pub const SYS_LOCATION: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 6, 0];
    pub const SYS_SERVICES: &[u32] = &[1, 3, 6, 1, 2, 1, 1, 7, 0];

    pub const HR_SYSTEM_UPTIME: &[u32] = &[1, 3, 6, 1, 2, 1, 25, 1, 1, 0];
    pub const HR_MEMORY_SIZE: &[u32] = &[1, 3, 6, 1, 2, 1, 25, 2, 2];
    /// `hrStorageEntry`; children are `<column>.<unit index>`.
    pub const HR_STORAGE_ENTRY: &[u32] = &[1, 3, 6, 1, 2, 1, 25, 2, 3, 1];

    pub const VENDOR_ROOT: &[u32] = &[1, 3, 9999];
    pub const CHIP: &[u32] = &[1, 3, 9999, 2];
    pub const WIFI: &[u32] = &[1, 3, 9999, 4];
    pub const SENSORS: &[u32] = &[1, 3, 9999, 10];
}

/// Board, link and clock the tree reads from. Owned by the component.
#[derive(Clone)]
pub struct Telemetry {
    pub board: Arc<dyn Board>,
    pub wifi: Arc<dyn WifiLink>,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("board", &self.board.family())
            .finish_non_exhaustive()
    }
}

/// Optional external sensors, held weakly.
#[derive(Clone, Default)]
pub struct SensorSet {
    pub temperature: Option<Weak<dyn Sensor>>,
    pub humidity: Option<Weak<dyn Sensor>>,
}

impl std::fmt::Debug for SensorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorSet")
            .field("temperature", &self.temperature.is_some())
            .field("humidity", &self.humidity.is_some())
            .finish()
    }
}

/// Populates and finalizes the device tree.
pub fn build(
    telemetry: &Telemetry,
    sensors: &SensorSet,
    identity: &SystemIdentity,
) -> Result<OidRegistry<Finalized>, RegistryError> {
    let mut reg = OidRegistry::with_capacity(48);

    system::register(&mut reg, telemetry, identity)?;
    storage::register(&mut reg, telemetry)?;
    vendor::register_heap(&mut reg, &telemetry.board)?;
    vendor::register_chip(&mut reg, &telemetry.board)?;
    vendor::register_wifi(&mut reg, &telemetry.wifi)?;
    vendor::register_sensors(&mut reg, sensors)?;

    let reg = reg.finalize();
    tracing::info!(
        entries = reg.len(),
        family = %telemetry.board.family(),
        "device MIB ready"
    );
    Ok(reg)
}

/// The vendor subtree root for a board family, e.g. `1.3.9999.32`.
pub fn vendor_root(board: &dyn Board) -> Oid {
    Oid::from_slice(oids::VENDOR_ROOT).child(board.family().code())
}

/// Binds a read to a weakly held source. The resulting provider yields
/// `None` once the source has been dropped.
fn bind<T, R, F>(source: &Arc<T>, read: F) -> impl Fn() -> Option<R> + Send + Sync + 'static
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&T) -> Option<R> + Send + Sync + 'static,
{
    let weak = Arc::downgrade(source);
    move || weak.upgrade().and_then(|s| read(&*s))
}
