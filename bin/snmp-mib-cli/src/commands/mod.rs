// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommands and the host glue they share.
//!
//! Every command runs the same component a board would, with the
//! development machine standing in for the hardware: an ESP32 board over
//! [`LinuxProbe`], a Wi-Fi link describing the primary host address, and
//! thermal zones as sensors.

pub mod config;
pub mod get;
pub mod status;
pub mod walk;
pub mod watch;

use anyhow::Context;
use device_telemetry::host::{LinuxProbe, ThermalZone};
use device_telemetry::{Esp32Board, Sensor, SystemClock, WifiSnapshot, WifiState};
use snmp_mib::{
    LoopbackAgent, LoopbackHandle, Request, Response, Running, SnmpComponent, SnmpConfig,
    Telemetry,
};
use std::net::{IpAddr, UdpSocket};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialises logging on stderr. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Settings given on the command line that override the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub name: Option<String>,
    pub location: Option<String>,
    pub community: Option<String>,
}

/// Loads the config file, or defaults, and applies overrides.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<SnmpConfig> {
    let mut config = match path {
        Some(path) => SnmpConfig::from_file(path)?,
        None => SnmpConfig::default(),
    };
    if let Some(name) = &overrides.name {
        config.name = name.clone();
    }
    if let Some(location) = &overrides.location {
        config.location = location.clone();
    }
    if let Some(community) = &overrides.community {
        config.read_community = community.clone();
    }
    config.validate()?;
    Ok(config)
}

/// A running component backed by the host.
pub struct HostDevice {
    pub component: SnmpComponent<Running>,
    pub board: Arc<Esp32Board<LinuxProbe>>,
    handle: LoopbackHandle,
    community: String,
    sensors: Vec<(String, Arc<ThermalZone>)>,
    // Providers hold weak handles; the device owns the sources.
    _wifi: Arc<WifiState>,
}

impl HostDevice {
    pub fn start(config: SnmpConfig) -> anyhow::Result<Self> {
        let board = Arc::new(Esp32Board::new(
            LinuxProbe::new().context("cannot read host memory statistics")?,
        ));
        tracing::info!("{}", board.probe().snapshot().summary());

        let wifi = Arc::new(WifiState::new());
        wifi.publish(host_link());

        let telemetry = Telemetry {
            board: board.clone(),
            wifi: wifi.clone(),
            clock: Arc::new(SystemClock::new()),
        };

        let agent = LoopbackAgent::new();
        let handle = agent.handle();
        let community = config.read_community.clone();

        let temperature = config.temperature_sensor.as_deref().map(resolve_sensor);
        let humidity = config.humidity_sensor.as_deref().map(resolve_sensor);

        let mut component = SnmpComponent::new(config, telemetry, agent);
        let mut sensors = Vec::new();
        if let Some((id, zone)) = temperature {
            let sensor: Arc<dyn Sensor> = zone.clone();
            component.set_temperature_sensor(&sensor);
            sensors.push((id, zone));
        }
        if let Some((id, zone)) = humidity {
            let sensor: Arc<dyn Sensor> = zone.clone();
            component.set_humidity_sensor(&sensor);
            sensors.push((id, zone));
        }

        let mut device = Self {
            component: component.setup()?,
            board,
            handle,
            community,
            sensors,
            _wifi: wifi,
        };
        device.sample_sensors();
        Ok(device)
    }

    /// Re-reads host statistics and samples the sensors.
    pub fn refresh(&mut self) {
        if let Err(e) = self.board.probe().refresh() {
            tracing::warn!("host refresh failed, keeping previous reading: {e}");
        }
        self.sample_sensors();
    }

    /// Sends one request through the agent and returns its answer.
    pub fn query(&mut self, request: Request) -> anyhow::Result<Response> {
        self.handle.send(self.community.as_str(), request);
        self.component.poll();
        self.handle
            .take_responses()
            .pop()
            .context("agent produced no response")
    }

    fn sample_sensors(&self) {
        for (id, zone) in &self.sensors {
            if let Err(e) = zone.sample() {
                tracing::warn!(sensor = %id, "sensor read failed: {e}");
            }
        }
    }
}

/// Maps a sensor id onto a host thermal zone.
///
/// `cpu` is the first zone, `thermal_zoneN` names a zone directly, and
/// anything else is taken as a path to a millidegree file.
fn resolve_sensor(id: &str) -> (String, Arc<ThermalZone>) {
    let zone = if id == "cpu" {
        ThermalZone::cpu()
    } else if id.starts_with("thermal_zone") {
        ThermalZone::at(format!("/sys/class/thermal/{id}/temp"))
    } else {
        ThermalZone::at(id)
    };
    (id.to_string(), Arc::new(zone))
}

/// Describes the host's primary interface as a station link.
///
/// The address is the one the kernel would route external traffic from;
/// connecting a UDP socket sends nothing.
fn host_link() -> WifiSnapshot {
    let ip = UdpSocket::bind("0.0.0.0:0")
        .and_then(|s| s.connect("192.0.2.1:9").map(|_| s))
        .and_then(|s| s.local_addr())
        .map(|addr| addr.ip())
        .ok()
        .filter(|ip: &IpAddr| !ip.is_unspecified());

    WifiSnapshot {
        ip_addresses: ip.into_iter().collect(),
        connected_at_ms: Some(0),
        ..Default::default()
    }
}
