// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # snmp-mib
//!
//! Exposes device telemetry through a read-mostly SNMP MIB.
//!
//! The component takes:
//! - A [`Telemetry`] bundle (board, Wi-Fi link, clock) from `device-telemetry`.
//! - Optional temperature and humidity sensors.
//! - A [`ProtocolAgent`] that owns the wire protocol.
//!
//! At setup it populates an `oid-registry` with the device tree (system
//! group, host resources, vendor subtree), finalizes it, and hands the
//! agent its community strings. Every poll lets the agent answer pending
//! requests against the finalized registry.
//!
//! # Type-State Lifecycle
//! ```text
//! SnmpComponent<Configured> → SnmpComponent<Running>
//! ```
//! Registration after setup does not compile.

mod agent;
mod component;
mod config;
mod error;
pub mod mib;

pub use agent::{
    dispatch, AgentSettings, LoopbackAgent, LoopbackHandle, ProtocolAgent, Request, Response,
};
pub use component::{ComponentState, Configured, Running, SnmpComponent, SETUP_PRIORITY};
pub use config::SnmpConfig;
pub use error::MibError;
pub use mib::{BuildInfo, SensorSet, SystemIdentity, Telemetry};
