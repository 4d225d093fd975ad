// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the SNMP component.

/// Errors that can occur while configuring or setting up the component.
///
/// Nothing in the poll path returns an error; once `setup` succeeds the
/// component only answers queries.
#[derive(Debug, thiserror::Error)]
pub enum MibError {
    /// MIB population registered an identifier twice or with the wrong kind.
    #[error("MIB registration failed: {0}")]
    Registry(#[from] oid_registry::RegistryError),

    /// A telemetry source could not be initialised.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] device_telemetry::TelemetryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
