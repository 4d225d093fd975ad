// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The OID registry with a type-state build/query split.
//!
//! ```text
//! OidRegistry<Building>
//!     │  .register() / .add_*()      (unsorted, duplicates rejected)
//!     │  .finalize()
//!     ▼
//! OidRegistry<Finalized>
//!        .get() / .get_next() / .get_bulk() / .walk()
//! ```
//!
//! `finalize` consumes the building registry, so registering after the
//! tree has been sorted does not compile. Queries binary-search the sorted
//! entry vector and only allocate for the rendered value itself.

use crate::{Oid, Provider, RegistryError, Value, ValueKind, ValueSource, VarBind};

// ── Type-state markers ─────────────────────────────────────────

/// Entries are being registered; queries are unavailable.
#[derive(Debug)]
pub struct Building;

/// Entries are sorted and the registry answers queries.
#[derive(Debug)]
pub struct Finalized;

/// Sealed trait for registry states.
///
/// Only [`Building`] and [`Finalized`] implement it:
///
/// ```compile_fail
/// #[derive(Debug)]
/// struct Frozen;
/// impl oid_registry::RegistryState for Frozen {}
/// ```
pub trait RegistryState: std::fmt::Debug + sealed::Sealed {}
impl RegistryState for Building {}
impl RegistryState for Finalized {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Building {}
    impl Sealed for super::Finalized {}
}

// ── Entries and results ────────────────────────────────────────

/// One binding of an identifier to a typed value source.
#[derive(Debug)]
pub struct Entry {
    oid: Oid,
    kind: ValueKind,
    source: ValueSource,
}

impl Entry {
    pub fn oid(&self) -> &Oid {
        &self.oid
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    /// Resolves the current value, invoking the provider for dynamic entries.
    pub fn render(&self) -> VarBind {
        VarBind::new(self.oid.clone(), self.source.resolve())
    }
}

/// Outcome of an exact-match lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResult {
    Value(VarBind),
    NoSuchObject,
}

impl GetResult {
    pub fn into_option(self) -> Option<VarBind> {
        match self {
            GetResult::Value(vb) => Some(vb),
            GetResult::NoSuchObject => None,
        }
    }
}

/// Outcome of a get-next lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetNextResult {
    Value(VarBind),
    EndOfMibView,
}

impl GetNextResult {
    pub fn into_option(self) -> Option<VarBind> {
        match self {
            GetNextResult::Value(vb) => Some(vb),
            GetNextResult::EndOfMibView => None,
        }
    }
}

// ── Registry ───────────────────────────────────────────────────

/// An ordered collection of [`Entry`] values keyed by [`Oid`].
///
/// # Example
/// ```
/// use oid_registry::{oid, GetNextResult, OidRegistry, Value};
///
/// let mut reg = OidRegistry::new();
/// reg.add_static_integer(oid!(1, 3, 6, 1, 2, 1, 1, 7, 0), 64).unwrap();
/// reg.add_static_string(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), "demo").unwrap();
/// let reg = reg.finalize();
///
/// let first = reg.get_next(&oid!(1, 3)).into_option().unwrap();
/// assert_eq!(first.value, Value::OctetString("demo".into()));
/// ```
pub struct OidRegistry<S: RegistryState = Building> {
    entries: Vec<Entry>,
    _state: std::marker::PhantomData<S>,
}

impl<S: RegistryState> OidRegistry<S> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Building ───────────────────────────────────────────────────

impl OidRegistry<Building> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            _state: std::marker::PhantomData,
        }
    }

    /// Inserts an entry.
    ///
    /// Fails without modifying the registry if `oid` is already present or
    /// if `source` does not yield `kind`.
    pub fn register(
        &mut self,
        oid: Oid,
        kind: ValueKind,
        source: impl Into<ValueSource>,
    ) -> Result<(), RegistryError> {
        let source = source.into();
        if source.kind() != kind {
            tracing::error!(%oid, declared = %kind, actual = %source.kind(), "kind mismatch");
            return Err(RegistryError::KindMismatch {
                oid,
                declared: kind,
                actual: source.kind(),
            });
        }
        if self.contains(&oid) {
            tracing::error!(%oid, "duplicate OID registration rejected");
            return Err(RegistryError::DuplicateOid { oid });
        }
        tracing::trace!(%oid, %kind, dynamic = source.is_dynamic(), "registered");
        self.entries.push(Entry { oid, kind, source });
        Ok(())
    }

    pub fn contains(&self, oid: &Oid) -> bool {
        self.entries.iter().any(|e| &e.oid == oid)
    }

    pub fn add_static_integer(&mut self, oid: Oid, value: i32) -> Result<(), RegistryError> {
        self.register(oid, ValueKind::Integer, Value::Integer(value))
    }

    pub fn add_static_string(
        &mut self,
        oid: Oid,
        value: impl Into<String>,
    ) -> Result<(), RegistryError> {
        self.register(oid, ValueKind::OctetString, Value::OctetString(value.into()))
    }

    pub fn add_oid(&mut self, oid: Oid, value: Oid) -> Result<(), RegistryError> {
        self.register(oid, ValueKind::ObjectIdentifier, Value::ObjectIdentifier(value))
    }

    pub fn add_dynamic_integer<F>(&mut self, oid: Oid, f: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Option<i32> + Send + Sync + 'static,
    {
        self.register(oid, ValueKind::Integer, Provider::integer(f))
    }

    pub fn add_dynamic_string<F>(&mut self, oid: Oid, f: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.register(oid, ValueKind::OctetString, Provider::string(f))
    }

    pub fn add_dynamic_timestamp<F>(&mut self, oid: Oid, f: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Option<u32> + Send + Sync + 'static,
    {
        self.register(oid, ValueKind::Timestamp, Provider::timestamp(f))
    }

    /// Sorts entries by identifier and switches to the query state.
    pub fn finalize(mut self) -> OidRegistry<Finalized> {
        self.entries.sort_by(|a, b| a.oid.cmp(&b.oid));
        tracing::debug!(entries = self.entries.len(), "registry finalized");
        OidRegistry {
            entries: self.entries,
            _state: std::marker::PhantomData,
        }
    }
}

impl Default for OidRegistry<Building> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Finalized ──────────────────────────────────────────────────

impl OidRegistry<Finalized> {
    /// Already sorted; returns `self` unchanged.
    pub fn finalize(self) -> Self {
        self
    }

    /// Exact-match lookup.
    pub fn get(&self, oid: &Oid) -> GetResult {
        match self.entries.binary_search_by(|e| e.oid.cmp(oid)) {
            Ok(idx) => GetResult::Value(self.entries[idx].render()),
            Err(_) => GetResult::NoSuchObject,
        }
    }

    /// Returns the first entry strictly after `oid`.
    ///
    /// `oid` does not need to be registered; a walk may start from any
    /// prefix such as `1.3`.
    pub fn get_next(&self, oid: &Oid) -> GetNextResult {
        match self.entries.get(self.successor_index(oid)) {
            Some(entry) => GetNextResult::Value(entry.render()),
            None => GetNextResult::EndOfMibView,
        }
    }

    /// Up to `max_repetitions` successive get-next results after `oid`.
    pub fn get_bulk(&self, oid: &Oid, max_repetitions: usize) -> Vec<VarBind> {
        let start = self.successor_index(oid);
        self.entries[start..]
            .iter()
            .take(max_repetitions)
            .map(Entry::render)
            .collect()
    }

    /// Renders every entry at or below `prefix`, in order.
    pub fn walk<'a>(&'a self, prefix: &'a Oid) -> impl Iterator<Item = VarBind> + 'a {
        let start = self.entries.partition_point(|e| e.oid < *prefix);
        self.entries[start..]
            .iter()
            .take_while(move |e| prefix.is_prefix_of(&e.oid))
            .map(Entry::render)
    }

    /// Declared kind of a registered identifier.
    pub fn kind_of(&self, oid: &Oid) -> Option<ValueKind> {
        self.entries
            .binary_search_by(|e| e.oid.cmp(oid))
            .ok()
            .map(|idx| self.entries[idx].kind)
    }

    /// Entries in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    fn successor_index(&self, oid: &Oid) -> usize {
        self.entries.partition_point(|e| e.oid <= *oid)
    }
}

impl<S: RegistryState> std::fmt::Debug for OidRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidRegistry")
            .field("state", &std::any::type_name::<S>())
            .field("entries", &self.entries.len())
            .finish()
    }
}
