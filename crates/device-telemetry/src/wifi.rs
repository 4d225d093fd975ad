// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Wi-Fi station link state.
//!
//! The platform's Wi-Fi driver pushes a [`WifiSnapshot`] into
//! [`WifiState`] whenever the link changes; MIB providers only read the
//! last published snapshot.

use std::net::IpAddr;
use std::sync::RwLock;

/// Read-only view of the station link.
pub trait WifiLink: Send + Sync {
    /// Received signal strength in dBm, `None` when disconnected.
    fn rssi(&self) -> Option<i32>;
    /// Hardware address of the associated access point.
    fn bssid(&self) -> Option<[u8; 6]>;
    fn ssid(&self) -> Option<String>;
    /// Addresses assigned to the station interface, primary first.
    fn ip_addresses(&self) -> Vec<IpAddr>;
    /// Clock reading (ms since boot) at which the link came up.
    fn connected_at_ms(&self) -> Option<u64>;
}

/// One published link state.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct WifiSnapshot {
    pub rssi: Option<i32>,
    pub bssid: Option<[u8; 6]>,
    pub ssid: Option<String>,
    pub ip_addresses: Vec<IpAddr>,
    pub connected_at_ms: Option<u64>,
}

/// Shared, last-writer-wins link state.
#[derive(Debug, Default)]
pub struct WifiState {
    inner: RwLock<WifiSnapshot>,
}

impl WifiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published snapshot.
    pub fn publish(&self, snapshot: WifiSnapshot) {
        match self.inner.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    /// Marks the link as down, keeping nothing from the previous state.
    pub fn disconnect(&self) {
        self.publish(WifiSnapshot::default());
    }

    pub fn snapshot(&self) -> WifiSnapshot {
        self.read(|s| s.clone())
    }

    fn read<T>(&self, f: impl FnOnce(&WifiSnapshot) -> T) -> T {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl WifiLink for WifiState {
    fn rssi(&self) -> Option<i32> {
        self.read(|s| s.rssi)
    }

    fn bssid(&self) -> Option<[u8; 6]> {
        self.read(|s| s.bssid)
    }

    fn ssid(&self) -> Option<String> {
        self.read(|s| s.ssid.clone())
    }

    fn ip_addresses(&self) -> Vec<IpAddr> {
        self.read(|s| s.ip_addresses.clone())
    }

    fn connected_at_ms(&self) -> Option<u64> {
        self.read(|s| s.connected_at_ms)
    }
}
