// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The boundary to the protocol engine.
//!
//! A [`ProtocolAgent`] owns the wire: it decodes requests, checks
//! community strings and encodes responses. The registry side of every
//! exchange is [`dispatch`], so agents only translate between their wire
//! format and [`Request`] / [`Response`].

use crate::SnmpConfig;
use oid_registry::{Finalized, GetNextResult, GetResult, Oid, OidRegistry, VarBind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Community strings handed to the agent at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub read_community: String,
    pub write_community: String,
}

impl AgentSettings {
    /// Whether `community` grants read access. The write community
    /// implies read.
    pub fn permits_read(&self, community: &str) -> bool {
        community == self.read_community || community == self.write_community
    }
}

impl From<&SnmpConfig> for AgentSettings {
    fn from(config: &SnmpConfig) -> Self {
        Self {
            read_community: config.read_community.clone(),
            write_community: config.write_community.clone(),
        }
    }
}

/// A protocol engine serving a finalized registry.
pub trait ProtocolAgent: Send {
    /// Called once during setup, before the first poll.
    fn begin(&mut self, settings: &AgentSettings);

    /// Services whatever requests are pending. Must not block.
    fn poll(&mut self, registry: &OidRegistry<Finalized>);
}

/// A decoded read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(Oid),
    GetNext(Oid),
    GetBulk { oid: Oid, max_repetitions: usize },
}

/// The registry's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Value(VarBind),
    NoSuchObject(Oid),
    EndOfMibView(Oid),
    /// Successive bindings; shorter than requested at the end of the tree.
    Bulk(Vec<VarBind>),
}

/// Answers one request from the registry.
pub fn dispatch(registry: &OidRegistry<Finalized>, request: &Request) -> Response {
    let response = match request {
        Request::Get(oid) => match registry.get(oid) {
            GetResult::Value(vb) => Response::Value(vb),
            GetResult::NoSuchObject => Response::NoSuchObject(oid.clone()),
        },
        Request::GetNext(oid) => match registry.get_next(oid) {
            GetNextResult::Value(vb) => Response::Value(vb),
            GetNextResult::EndOfMibView => Response::EndOfMibView(oid.clone()),
        },
        Request::GetBulk {
            oid,
            max_repetitions,
        } => Response::Bulk(registry.get_bulk(oid, *max_repetitions)),
    };
    tracing::debug!(?request, ?response, "dispatched");
    response
}

// ── Loopback agent ─────────────────────────────────────────────

#[derive(Debug, Default)]
struct Queues {
    inbound: VecDeque<(String, Request)>,
    outbound: VecDeque<Response>,
    rejected: u64,
}

fn lock(queues: &Mutex<Queues>) -> MutexGuard<'_, Queues> {
    match queues.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// An in-process agent: requests are queued through a [`LoopbackHandle`]
/// and answered on the next poll.
///
/// Requests queued before [`ProtocolAgent::begin`] stay queued until the
/// agent has its settings. Requests with an unknown community are dropped
/// and counted, the way an SNMP agent discards them.
#[derive(Debug, Default)]
pub struct LoopbackAgent {
    queues: Arc<Mutex<Queues>>,
    settings: Option<AgentSettings>,
}

impl LoopbackAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for submitting requests and collecting responses.
    pub fn handle(&self) -> LoopbackHandle {
        LoopbackHandle {
            queues: Arc::clone(&self.queues),
        }
    }
}

impl ProtocolAgent for LoopbackAgent {
    fn begin(&mut self, settings: &AgentSettings) {
        tracing::info!("loopback agent started");
        self.settings = Some(settings.clone());
    }

    fn poll(&mut self, registry: &OidRegistry<Finalized>) {
        let Some(settings) = &self.settings else {
            return;
        };
        let mut queues = lock(&self.queues);
        while let Some((community, request)) = queues.inbound.pop_front() {
            if !settings.permits_read(&community) {
                queues.rejected += 1;
                tracing::warn!(community = %community, "request with unknown community dropped");
                continue;
            }
            let response = dispatch(registry, &request);
            queues.outbound.push_back(response);
        }
    }
}

/// Client side of a [`LoopbackAgent`].
#[derive(Debug, Clone)]
pub struct LoopbackHandle {
    queues: Arc<Mutex<Queues>>,
}

impl LoopbackHandle {
    pub fn send(&self, community: impl Into<String>, request: Request) {
        lock(&self.queues)
            .inbound
            .push_back((community.into(), request));
    }

    /// Drains the responses produced so far, oldest first.
    pub fn take_responses(&self) -> Vec<Response> {
        lock(&self.queues).outbound.drain(..).collect()
    }

    /// Number of requests dropped for a bad community.
    pub fn rejected(&self) -> u64 {
        lock(&self.queues).rejected
    }
}
