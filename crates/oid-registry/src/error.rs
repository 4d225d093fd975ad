// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for registry construction.

use crate::{Oid, ValueKind};

/// Errors raised while building a registry.
///
/// Lookups never fail with an error: unknown identifiers are reported
/// through [`GetResult`](crate::GetResult) and
/// [`GetNextResult`](crate::GetNextResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// An entry with this identifier already exists.
    #[error("duplicate registration for OID {oid}")]
    DuplicateOid { oid: Oid },

    /// The value source does not produce the declared kind.
    #[error("OID {oid} declared as {declared} but its source yields {actual}")]
    KindMismatch {
        oid: Oid,
        declared: ValueKind,
        actual: ValueKind,
    },

    /// Text that is not a dotted sequence of non-negative integers.
    #[error("invalid OID '{input}'")]
    InvalidOid { input: String },
}
