// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! SoC temperature via `/sys/class/thermal/`, exposed as a [`Sensor`].
//!
//! The kernel reports millidegrees Celsius. Reading sysfs is too slow for
//! a MIB provider, so [`ThermalZone::sample`] is called from the host loop
//! and the value is published into a [`SensorCell`].

use super::sysfs::read_sysfs_file;
use crate::{Sensor, SensorCell, TelemetryError};
use std::path::{Path, PathBuf};

/// Default sysfs path for the CPU thermal zone.
const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// A kernel thermal zone sampled into a sensor cell.
#[derive(Debug)]
pub struct ThermalZone {
    path: PathBuf,
    cell: SensorCell,
}

impl ThermalZone {
    /// The first thermal zone, usually the SoC.
    pub fn cpu() -> Self {
        Self::at(THERMAL_ZONE_PATH)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: SensorCell::new(),
        }
    }

    /// Reads the zone and publishes the temperature. On failure the cell
    /// is invalidated so the MIB reports 0 rather than a stale value.
    pub fn sample(&self) -> Result<f32, TelemetryError> {
        match read_celsius(&self.path) {
            Ok(celsius) => {
                self.cell.publish(celsius);
                Ok(celsius)
            }
            Err(e) => {
                self.cell.invalidate();
                Err(e)
            }
        }
    }
}

impl Sensor for ThermalZone {
    fn has_state(&self) -> bool {
        self.cell.has_state()
    }

    fn state(&self) -> f32 {
        self.cell.state()
    }
}

fn read_celsius(path: &Path) -> Result<f32, TelemetryError> {
    let content = read_sysfs_file(path)?;
    let millidegrees: i64 = content.parse::<i64>().map_err(|_| TelemetryError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected integer millidegrees, got '{content}'"),
    })?;
    Ok(millidegrees as f32 / 1000.0)
}
