// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The vendor subtree under `1.3.9999`.

use super::{bind, oids, vendor_root, SensorSet};
use device_telemetry::{format_mac, scale_tenths, to_mib_integer, Board, Sensor, WifiLink};
use oid_registry::{Building, Oid, OidRegistry, RegistryError};
use std::sync::{Arc, Weak};

/// Heap counters under `1.3.9999.<code>.<n>.0`, in the board's own layout.
pub(super) fn register_heap(
    reg: &mut OidRegistry<Building>,
    board: &Arc<dyn Board>,
) -> Result<(), RegistryError> {
    let root = vendor_root(board.as_ref());
    for &(arc, stat) in board.heap_layout() {
        reg.add_dynamic_integer(
            root.extend(&[arc, 0]),
            bind(board, move |b| b.read_heap(stat).map(to_mib_integer)),
        )?;
    }
    Ok(())
}

pub(super) fn register_chip(
    reg: &mut OidRegistry<Building>,
    board: &Arc<dyn Board>,
) -> Result<(), RegistryError> {
    let chip = Oid::from_slice(oids::CHIP);

    reg.add_static_integer(chip.extend(&[1, 0]), board.family().code() as i32)?;
    reg.add_dynamic_integer(
        chip.extend(&[2, 0]),
        bind(board, |b| Some(to_mib_integer(i64::from(b.cpu_freq_mhz())))),
    )?;
    reg.add_dynamic_string(
        chip.extend(&[3, 0]),
        bind(board, |b| Some(b.chip_identity().model)),
    )?;
    reg.add_dynamic_integer(
        chip.extend(&[4, 0]),
        bind(board, |b| Some(to_mib_integer(i64::from(b.chip_identity().cores)))),
    )?;
    reg.add_dynamic_integer(
        chip.extend(&[5, 0]),
        bind(board, |b| Some(to_mib_integer(i64::from(b.chip_identity().revision)))),
    )?;
    Ok(())
}

pub(super) fn register_wifi(
    reg: &mut OidRegistry<Building>,
    wifi: &Arc<dyn WifiLink>,
) -> Result<(), RegistryError> {
    let root = Oid::from_slice(oids::WIFI);

    reg.add_dynamic_integer(root.extend(&[1, 0]), bind(wifi, |w| w.rssi()))?;
    reg.add_dynamic_string(
        root.extend(&[2, 0]),
        bind(wifi, |w| w.bssid().map(|mac| format_mac(&mac))),
    )?;
    reg.add_dynamic_string(root.extend(&[3, 0]), bind(wifi, |w| w.ssid()))?;
    reg.add_dynamic_string(
        root.extend(&[4, 0]),
        bind(wifi, |w| {
            w.ip_addresses().first().map(|ip| ip.to_string())
        }),
    )?;
    Ok(())
}

/// Sensor readings in tenths. Only configured sensors get an entry.
pub(super) fn register_sensors(
    reg: &mut OidRegistry<Building>,
    sensors: &SensorSet,
) -> Result<(), RegistryError> {
    let root = Oid::from_slice(oids::SENSORS);

    if let Some(temperature) = &sensors.temperature {
        reg.add_dynamic_integer(root.extend(&[1, 0]), tenths(temperature.clone()))?;
    }
    if let Some(humidity) = &sensors.humidity {
        reg.add_dynamic_integer(root.extend(&[2, 0]), tenths(humidity.clone()))?;
    }
    Ok(())
}

fn tenths(sensor: Weak<dyn Sensor>) -> impl Fn() -> Option<i32> + Send + Sync + 'static {
    move || sensor.upgrade()?.reading().map(scale_tenths)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::FakeBoard;
    use super::*;
    use device_telemetry::{BoardFamily, SensorCell, WifiSnapshot, WifiState};
    use oid_registry::{oid, Value};
    use std::net::{IpAddr, Ipv4Addr};

    fn value(reg: &OidRegistry<oid_registry::Finalized>, oid: Oid) -> Value {
        reg.get(&oid).into_option().expect("entry present").value
    }

    #[test]
    fn test_heap_follows_board_layout() {
        let board: Arc<dyn Board> = Arc::new(FakeBoard::esp8266());
        let mut reg = OidRegistry::new();
        register_heap(&mut reg, &board).unwrap();
        let reg = reg.finalize();

        assert_eq!(reg.len(), 3);
        assert_eq!(value(&reg, oid!(1, 3, 9999, 8266, 1, 0)), Value::Integer(30_000));
        assert_eq!(value(&reg, oid!(1, 3, 9999, 8266, 2, 0)), Value::Integer(12));
        assert_eq!(value(&reg, oid!(1, 3, 9999, 8266, 3, 0)), Value::Integer(18_000));
    }

    #[test]
    fn test_chip_entries() {
        let board: Arc<dyn Board> = Arc::new(FakeBoard::esp32());
        let mut reg = OidRegistry::new();
        register_chip(&mut reg, &board).unwrap();
        let reg = reg.finalize();

        assert_eq!(value(&reg, oid!(1, 3, 9999, 2, 1, 0)), Value::Integer(32));
        assert_eq!(value(&reg, oid!(1, 3, 9999, 2, 2, 0)), Value::Integer(240));
        assert_eq!(
            value(&reg, oid!(1, 3, 9999, 2, 3, 0)),
            Value::OctetString("ESP32-D0WDQ6".into())
        );
        assert_eq!(value(&reg, oid!(1, 3, 9999, 2, 4, 0)), Value::Integer(2));
        assert_eq!(value(&reg, oid!(1, 3, 9999, 2, 5, 0)), Value::Integer(1));
    }

    #[test]
    fn test_wifi_connected_and_disconnected() {
        let state = Arc::new(WifiState::new());
        let wifi: Arc<dyn WifiLink> = state.clone();
        let mut reg = OidRegistry::new();
        register_wifi(&mut reg, &wifi).unwrap();
        let reg = reg.finalize();

        assert_eq!(value(&reg, oid!(1, 3, 9999, 4, 1, 0)), Value::Integer(0));
        assert_eq!(value(&reg, oid!(1, 3, 9999, 4, 4, 0)), Value::OctetString(String::new()));

        state.publish(WifiSnapshot {
            rssi: Some(-58),
            bssid: Some([0xAA, 0x01, 0x2B, 0x03, 0x04, 0x05]),
            ssid: Some("greenhouse".into()),
            ip_addresses: vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 17))],
            connected_at_ms: Some(0),
        });
        assert_eq!(value(&reg, oid!(1, 3, 9999, 4, 1, 0)), Value::Integer(-58));
        assert_eq!(
            value(&reg, oid!(1, 3, 9999, 4, 2, 0)),
            Value::OctetString("AA:01:2B:03:04:05".into())
        );
        assert_eq!(
            value(&reg, oid!(1, 3, 9999, 4, 3, 0)),
            Value::OctetString("greenhouse".into())
        );
        assert_eq!(
            value(&reg, oid!(1, 3, 9999, 4, 4, 0)),
            Value::OctetString("10.0.0.17".into())
        );
    }

    #[test]
    fn test_sensors_only_when_configured() {
        let temperature: Arc<dyn Sensor> = Arc::new(SensorCell::with_reading(21.45));
        let sensors = SensorSet {
            temperature: Some(Arc::downgrade(&temperature)),
            humidity: None,
        };
        let mut reg = OidRegistry::new();
        register_sensors(&mut reg, &sensors).unwrap();
        let reg = reg.finalize();

        assert_eq!(reg.len(), 1);
        assert_eq!(value(&reg, oid!(1, 3, 9999, 10, 1, 0)), Value::Integer(214));
        assert!(reg.get(&oid!(1, 3, 9999, 10, 2, 0)).into_option().is_none());

        drop(temperature);
        assert_eq!(value(&reg, oid!(1, 3, 9999, 10, 1, 0)), Value::Integer(0));
    }

    #[test]
    fn test_dropped_board_reads_default() {
        let board: Arc<dyn Board> = Arc::new(FakeBoard::esp32());
        let mut reg = OidRegistry::new();
        register_heap(&mut reg, &board).unwrap();
        let reg = reg.finalize();
        assert_eq!(board.family(), BoardFamily::Esp32);

        drop(board);
        for entry in reg.iter() {
            assert_eq!(entry.render().value, Value::Integer(0));
        }
    }
}
