// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Component configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! name = "greenhouse-node"
//! read_community = "public"
//! write_community = "private"
//! contact = "ops@example.org"
//! location = "Greenhouse 2, north wall"
//! board = "esp32"
//! temperature_sensor = "dht22_temperature"
//! humidity_sensor = "dht22_humidity"
//! ```

use crate::MibError;
use device_telemetry::BoardFamily;
use std::path::Path;

/// Configuration accepted at setup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnmpConfig {
    /// Device name reported as `sysName`.
    pub name: String,
    /// Community string granting read access.
    pub read_community: String,
    /// Community string granting write access.
    pub write_community: String,
    /// Administrative contact (`sysContact`).
    pub contact: String,
    /// Physical location (`sysLocation`).
    pub location: String,
    /// Board family the firmware was built for.
    pub board: BoardFamily,
    /// Id of the sensor published as temperature, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_sensor: Option<String>,
    /// Id of the sensor published as humidity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_sensor: Option<String>,
}

impl SnmpConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, MibError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MibError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, MibError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| MibError::ConfigError(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, MibError> {
        toml::to_string_pretty(self)
            .map_err(|e| MibError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Rejects empty community strings.
    pub fn validate(&self) -> Result<(), MibError> {
        if self.read_community.is_empty() {
            return Err(MibError::ConfigError(
                "read_community must not be empty".to_string(),
            ));
        }
        if self.write_community.is_empty() {
            return Err(MibError::ConfigError(
                "write_community must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SnmpConfig {
    fn default() -> Self {
        Self {
            name: "device".to_string(),
            read_community: "public".to_string(),
            write_community: "private".to_string(),
            contact: String::new(),
            location: String::new(),
            board: BoardFamily::Esp32,
            temperature_sensor: None,
            humidity_sensor: None,
        }
    }
}
