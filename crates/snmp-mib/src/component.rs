// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The firmware component with a type-state lifecycle.
//!
//! ```text
//! SnmpComponent<Configured>
//!     │  .set_temperature_sensor() / .set_humidity_sensor()
//!     │  .setup()
//!     ▼
//! SnmpComponent<Running>
//!     │  .poll()   (every main-loop tick)
//! ```
//!
//! `setup` consumes the configured component, so the registry can only be
//! populated once and sensors cannot be attached after it is finalized.

use crate::agent::{AgentSettings, ProtocolAgent};
use crate::mib::{self, BuildInfo, SensorSet, SystemIdentity, Telemetry};
use crate::{MibError, SnmpConfig};
use device_telemetry::Sensor;
use oid_registry::{Finalized, OidRegistry};
use std::sync::Arc;

/// Scheduling priority reported to the host framework: after Wi-Fi.
pub const SETUP_PRIORITY: f32 = 250.0;

// ── Type-state markers ─────────────────────────────────────────

/// Configuration accepted, registry not yet built.
#[derive(Debug)]
pub struct Configured {
    sensors: SensorSet,
}

/// Registry finalized and agent started.
#[derive(Debug)]
pub struct Running {
    registry: OidRegistry<Finalized>,
}

/// Sealed trait for component states.
///
/// Only [`Configured`] and [`Running`] implement it:
///
/// ```compile_fail
/// #[derive(Debug)]
/// struct Paused;
/// impl snmp_mib::ComponentState for Paused {}
/// ```
pub trait ComponentState: std::fmt::Debug + sealed::Sealed {}
impl ComponentState for Configured {}
impl ComponentState for Running {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Configured {}
    impl Sealed for super::Running {}
}

// ── Component ──────────────────────────────────────────────────

/// Exposes device telemetry through a protocol agent.
///
/// # Example
/// ```no_run
/// use device_telemetry::{Esp32Board, host::LinuxProbe, SystemClock, WifiState};
/// use snmp_mib::{LoopbackAgent, SnmpComponent, SnmpConfig, Telemetry};
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), snmp_mib::MibError> {
/// let telemetry = Telemetry {
///     board: Arc::new(Esp32Board::new(LinuxProbe::new()?)),
///     wifi: Arc::new(WifiState::new()),
///     clock: Arc::new(SystemClock::new()),
/// };
/// let mut component =
///     SnmpComponent::new(SnmpConfig::default(), telemetry, LoopbackAgent::new()).setup()?;
/// component.poll();
/// # Ok(())
/// # }
/// ```
pub struct SnmpComponent<S: ComponentState = Configured> {
    config: SnmpConfig,
    telemetry: Telemetry,
    build: BuildInfo,
    agent: Box<dyn ProtocolAgent>,
    state: S,
}

// ── Configured → Running ───────────────────────────────────────

impl SnmpComponent<Configured> {
    pub fn new(
        config: SnmpConfig,
        telemetry: Telemetry,
        agent: impl ProtocolAgent + 'static,
    ) -> Self {
        let build = BuildInfo::current(config.board.as_str());
        Self {
            config,
            telemetry,
            build,
            agent: Box::new(agent),
            state: Configured {
                sensors: SensorSet::default(),
            },
        }
    }

    /// Overrides the build identity folded into `sysDescr`.
    pub fn with_build_info(mut self, build: BuildInfo) -> Self {
        self.build = build;
        self
    }

    /// Publishes `sensor` as temperature. Only a weak handle is kept.
    pub fn set_temperature_sensor(&mut self, sensor: &Arc<dyn Sensor>) {
        self.state.sensors.temperature = Some(Arc::downgrade(sensor));
    }

    /// Publishes `sensor` as relative humidity. Only a weak handle is kept.
    pub fn set_humidity_sensor(&mut self, sensor: &Arc<dyn Sensor>) {
        self.state.sensors.humidity = Some(Arc::downgrade(sensor));
    }

    /// Builds and finalizes the device MIB, then starts the agent.
    pub fn setup(mut self) -> Result<SnmpComponent<Running>, MibError> {
        self.config.validate()?;

        let family = self.telemetry.board.family();
        if family != self.config.board {
            tracing::warn!(
                configured = %self.config.board,
                detected = %family,
                "board family differs from configuration, using detected"
            );
        }
        if self.config.temperature_sensor.is_some() && self.state.sensors.temperature.is_none() {
            tracing::warn!("temperature sensor configured but not attached");
        }
        if self.config.humidity_sensor.is_some() && self.state.sensors.humidity.is_none() {
            tracing::warn!("humidity sensor configured but not attached");
        }

        let identity = SystemIdentity::new(&self.config, &self.build);
        let registry = mib::build(&self.telemetry, &self.state.sensors, &identity)?;

        self.agent.begin(&AgentSettings::from(&self.config));
        tracing::info!(name = %self.config.name, "SNMP component running");

        Ok(SnmpComponent {
            config: self.config,
            telemetry: self.telemetry,
            build: self.build,
            agent: self.agent,
            state: Running { registry },
        })
    }
}

// ── Running ────────────────────────────────────────────────────

impl SnmpComponent<Running> {
    /// Lets the agent service pending requests.
    pub fn poll(&mut self) {
        self.agent.poll(&self.state.registry);
    }

    pub fn registry(&self) -> &OidRegistry<Finalized> {
        &self.state.registry
    }
}

// ── Any state ──────────────────────────────────────────────────

impl<S: ComponentState> SnmpComponent<S> {
    pub fn config(&self) -> &SnmpConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn setup_priority(&self) -> f32 {
        SETUP_PRIORITY
    }

    /// Logs the active configuration. Community strings are not logged.
    pub fn dump_config(&self) {
        tracing::info!("SNMP:");
        tracing::info!("  name: {}", self.config.name);
        tracing::info!("  contact: {}", self.config.contact);
        tracing::info!("  location: {}", self.config.location);
        tracing::info!("  board: {}", self.config.board);
        tracing::info!("  description: {}", self.build.description());
        if let Some(id) = &self.config.temperature_sensor {
            tracing::info!("  temperature sensor: {id}");
        }
        if let Some(id) = &self.config.humidity_sensor {
            tracing::info!("  humidity sensor: {id}");
        }
    }
}

impl<S: ComponentState> std::fmt::Debug for SnmpComponent<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnmpComponent")
            .field("name", &self.config.name)
            .field("telemetry", &self.telemetry)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{LoopbackAgent, Request, Response};
    use crate::mib::fixtures::FakeBoard;
    use device_telemetry::{ManualClock, SensorCell, WifiState};
    use oid_registry::{oid, Value};

    fn telemetry(board: FakeBoard) -> Telemetry {
        Telemetry {
            board: Arc::new(board),
            wifi: Arc::new(WifiState::new()),
            clock: Arc::new(ManualClock::new(0)),
        }
    }

    #[test]
    fn test_setup_and_poll() {
        let agent = LoopbackAgent::new();
        let handle = agent.handle();
        let mut component =
            SnmpComponent::new(SnmpConfig::default(), telemetry(FakeBoard::esp32()), agent)
                .setup()
                .unwrap();
        assert_eq!(component.registry().len(), 32);

        handle.send("public", Request::Get(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)));
        component.poll();
        let responses = handle.take_responses();
        match &responses[..] {
            [Response::Value(vb)] => assert_eq!(vb.value, Value::OctetString("device".into())),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_sensors_attached_before_setup() {
        let humidity: Arc<dyn Sensor> = Arc::new(SensorCell::with_reading(55.5));
        let mut component = SnmpComponent::new(
            SnmpConfig::default(),
            telemetry(FakeBoard::esp8266()),
            LoopbackAgent::new(),
        );
        component.set_humidity_sensor(&humidity);
        let component = component.setup().unwrap();

        let reg = component.registry();
        assert!(reg.get(&oid!(1, 3, 9999, 10, 1, 0)).into_option().is_none());
        let vb = reg.get(&oid!(1, 3, 9999, 10, 2, 0)).into_option().unwrap();
        assert_eq!(vb.value, Value::Integer(555));
    }

    #[test]
    fn test_invalid_config_fails_setup() {
        let config = SnmpConfig {
            read_community: String::new(),
            ..Default::default()
        };
        let result =
            SnmpComponent::new(config, telemetry(FakeBoard::esp32()), LoopbackAgent::new()).setup();
        assert!(matches!(result, Err(MibError::ConfigError(_))));
    }

    #[test]
    fn test_setup_priority() {
        let component = SnmpComponent::new(
            SnmpConfig::default(),
            telemetry(FakeBoard::esp32()),
            LoopbackAgent::new(),
        );
        assert_eq!(component.setup_priority(), 250.0);
        component.dump_config();
    }

    #[test]
    fn test_debug_omits_communities() {
        let config = SnmpConfig {
            read_community: "r-s3cret".into(),
            write_community: "w-s3cret".into(),
            ..Default::default()
        };
        let component =
            SnmpComponent::new(config, telemetry(FakeBoard::esp32()), LoopbackAgent::new());
        component.dump_config();
        let running = component.setup().unwrap();

        let text = format!("{running:?}");
        assert!(text.contains("device"));
        assert!(!text.contains("s3cret"));
    }

    #[test]
    fn test_custom_build_info() {
        let build = BuildInfo {
            framework: "fw".into(),
            version: "2.0".into(),
            compiled: "today".into(),
            board: "lolin".into(),
        };
        let component = SnmpComponent::new(
            SnmpConfig::default(),
            telemetry(FakeBoard::esp32()),
            LoopbackAgent::new(),
        )
        .with_build_info(build)
        .setup()
        .unwrap();
        let vb = component
            .registry()
            .get(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0))
            .into_option()
            .unwrap();
        assert_eq!(
            vb.value,
            Value::OctetString("fw version 2.0 compiled today, Board lolin".into())
        );
    }
}
