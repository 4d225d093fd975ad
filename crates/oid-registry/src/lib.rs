// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # oid-registry
//!
//! A sorted registry mapping numeric object identifiers to typed values,
//! resolved on demand when a network manager polls the device.
//!
//! # Key Components
//!
//! - [`Oid`] — arc sequence with numeric, component-wise ordering.
//! - [`Value`] / [`ValueKind`] — the four value types the agent encodes
//!   (integer, octet string, object identifier, time ticks).
//! - [`ValueSource`] — either a fixed [`Value`] or a typed [`Provider`]
//!   closure evaluated at read time.
//! - [`OidRegistry`] — built once, finalized (sorted) once, then queried
//!   with [`get`](OidRegistry::get) and [`get_next`](OidRegistry::get_next).
//!
//! # Failure Policy
//! Registration rejects duplicates and kind mismatches with a
//! [`RegistryError`]. Queries never fail: a missing identifier yields
//! [`GetResult::NoSuchObject`] or [`GetNextResult::EndOfMibView`], and a
//! provider that reports `None` renders as the kind's default (0 or an
//! empty string).

mod error;
mod oid;
mod registry;
mod source;
mod value;

pub use error::RegistryError;
pub use oid::Oid;
pub use registry::{
    Building, Entry, Finalized, GetNextResult, GetResult, OidRegistry, RegistryState,
};
pub use source::{Provider, ValueSource};
pub use value::{Value, ValueKind, VarBind};
