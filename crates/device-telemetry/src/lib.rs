// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-telemetry
//!
//! Telemetry sources the device MIB reads at poll time.
//!
//! # Sources
//! - [`Board`] — heap, auxiliary memory, flash, chip identity and CPU
//!   frequency, implemented by [`Esp32Board`] and [`Esp8266Board`] over
//!   narrow probe traits ([`Esp32Probe`], [`Esp8266Probe`]).
//! - [`WifiLink`] — station link state, published through [`WifiState`].
//! - [`Clock`] — milliseconds since boot.
//! - [`Sensor`] — optional external sensors; [`SensorCell`] is the
//!   lock-free published reading.
//! - [`host`] — a Linux probe and thermal zone so a development machine
//!   can stand in for a board.
//!
//! Every read made on behalf of the MIB is fast and infallible. Sources
//! without data return `None` or zero; only the host sampling calls return
//! a [`TelemetryError`], and those run outside the poll path.

mod board;
mod clock;
mod error;
pub mod esp32;
pub mod esp8266;
mod format;
pub mod host;
mod sensor;
mod wifi;

pub use board::{
    to_mib_integer, AuxMemoryStats, Board, BoardFamily, ChipIdentity, FlashStats, HeapStat,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TelemetryError;
pub use esp32::{Esp32Board, Esp32Probe};
pub use esp8266::{Esp8266Board, Esp8266Probe};
pub use format::{format_mac, scale_tenths, ticks_from_millis};
pub use sensor::{Sensor, SensorCell};
pub use wifi::{WifiLink, WifiSnapshot, WifiState};
