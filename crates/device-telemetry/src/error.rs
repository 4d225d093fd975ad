// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for telemetry sources.

/// Errors that can occur when sampling host telemetry.
///
/// These never reach the MIB: adapters turn a failed read into `None` and
/// the registry renders the default value.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to read a sysfs or procfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from a system file.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The expected sysfs path does not exist on this host.
    #[error("telemetry path not found: {path}")]
    NotAvailable { path: String },

    /// A board family name that is neither `esp32` nor `esp8266`.
    #[error("unknown board family '{0}'; expected 'esp32' or 'esp8266'")]
    UnknownBoard(String),
}
