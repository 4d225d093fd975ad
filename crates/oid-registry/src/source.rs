// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Value sources: fixed values and typed provider closures.
//!
//! A [`Provider`] is a zero-argument closure whose return type fixes the
//! entry's kind. Providers return `Option`: `None` means the underlying
//! telemetry source is unavailable, and the registry renders the kind's
//! default instead of failing the request.

use crate::{Oid, Value, ValueKind};
use std::fmt;

type IntegerFn = Box<dyn Fn() -> Option<i32> + Send + Sync>;
type StringFn = Box<dyn Fn() -> Option<String> + Send + Sync>;
type OidFn = Box<dyn Fn() -> Option<Oid> + Send + Sync>;
type TicksFn = Box<dyn Fn() -> Option<u32> + Send + Sync>;

/// A typed value-producing closure.
pub enum Provider {
    Integer(IntegerFn),
    OctetString(StringFn),
    ObjectIdentifier(OidFn),
    Timestamp(TicksFn),
}

impl Provider {
    pub fn integer<F>(f: F) -> Self
    where
        F: Fn() -> Option<i32> + Send + Sync + 'static,
    {
        Provider::Integer(Box::new(f))
    }

    pub fn string<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Provider::OctetString(Box::new(f))
    }

    pub fn oid<F>(f: F) -> Self
    where
        F: Fn() -> Option<Oid> + Send + Sync + 'static,
    {
        Provider::ObjectIdentifier(Box::new(f))
    }

    pub fn timestamp<F>(f: F) -> Self
    where
        F: Fn() -> Option<u32> + Send + Sync + 'static,
    {
        Provider::Timestamp(Box::new(f))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Provider::Integer(_) => ValueKind::Integer,
            Provider::OctetString(_) => ValueKind::OctetString,
            Provider::ObjectIdentifier(_) => ValueKind::ObjectIdentifier,
            Provider::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Invokes the closure, substituting the kind default for `None`.
    pub fn resolve(&self) -> Value {
        let value = match self {
            Provider::Integer(f) => f().map(Value::Integer),
            Provider::OctetString(f) => f().map(Value::OctetString),
            Provider::ObjectIdentifier(f) => f().map(Value::ObjectIdentifier),
            Provider::Timestamp(f) => f().map(Value::TimeTicks),
        };
        value.unwrap_or_else(|| self.kind().default_value())
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Provider::{:?}(<fn>)", self.kind())
    }
}

/// Where an entry's value comes from.
#[derive(Debug)]
pub enum ValueSource {
    Static(Value),
    Dynamic(Provider),
}

impl ValueSource {
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueSource::Static(v) => v.kind(),
            ValueSource::Dynamic(p) => p.kind(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, ValueSource::Dynamic(_))
    }

    pub fn resolve(&self) -> Value {
        match self {
            ValueSource::Static(v) => v.clone(),
            ValueSource::Dynamic(p) => p.resolve(),
        }
    }
}

impl From<Value> for ValueSource {
    fn from(value: Value) -> Self {
        ValueSource::Static(value)
    }
}

impl From<Provider> for ValueSource {
    fn from(provider: Provider) -> Self {
        ValueSource::Dynamic(provider)
    }
}
